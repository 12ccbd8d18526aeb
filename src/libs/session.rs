//! Logged-in identity and the session token.
//!
//! After a successful login the token (encrypted with [`Secret`]), the user
//! id, the username and the role are written to the client state. On every
//! later run [`Session::restore`] reads them back and checks the token's
//! `exp` claim. The claim is only read, never verified; verification is the
//! server's job.
//!
//! Expiry and unreadable tokens clear the identity keys only. Today's
//! attendance cache survives so a re-login continues where the user left
//! off. An explicit [`Session::logout`] also forgets the last active screen.

use crate::api::{LoginResponse, ADMIN_ROLE};
use crate::db::client_state::{ClientState, StateKey};
use crate::libs::messages::Message;
use crate::libs::secret::Secret;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Department label shown next to the username.
    pub fn department(&self) -> &'static str {
        if self.is_admin() {
            "Administrator"
        } else {
            "General user"
        }
    }
}

/// Outcome of [`Session::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Active { identity: UserIdentity, token: String },
    Expired,
    Unreadable,
    Missing,
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Reads the `exp` claim (seconds since the epoch) from a JWT without
/// verifying its signature.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let decoded = BASE64_URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice::<Claims>(&decoded).ok()?.exp
}

pub struct Session {
    state: ClientState,
    secret: Secret,
}

impl Session {
    pub fn new() -> Result<Self> {
        Ok(Self::from_state(ClientState::new()?))
    }

    pub fn from_state(state: ClientState) -> Self {
        Self {
            state,
            secret: Secret::new(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Persists a login reply. A reply without a token is a failed login.
    pub fn save_login(&self, response: &LoginResponse) -> Result<UserIdentity> {
        let Some(token) = response.token.as_deref().filter(|token| !token.is_empty()) else {
            msg_bail_anyhow!(Message::LoginNoToken);
        };

        let identity = UserIdentity {
            user_id: response.user_id,
            username: response.username.clone(),
            role: response.role.clone().unwrap_or_default(),
        };

        self.state.set(StateKey::JwtToken, &self.secret.encrypt(token)?)?;
        self.state.set(StateKey::CurrentUserId, &identity.user_id.to_string())?;
        self.state.set(StateKey::Username, &identity.username)?;
        self.state.set(StateKey::UserRole, &identity.role)?;

        Ok(identity)
    }

    /// Identity keys as stored, without looking at the token.
    pub fn identity(&self) -> Result<Option<UserIdentity>> {
        let user_id = self.state.get(StateKey::CurrentUserId)?.and_then(|id| id.parse::<i64>().ok());
        let username = self.state.get(StateKey::Username)?;
        let role = self.state.get(StateKey::UserRole)?;

        Ok(match (user_id, username, role) {
            (Some(user_id), Some(username), Some(role)) => Some(UserIdentity { user_id, username, role }),
            _ => None,
        })
    }

    /// Checks the stored session against `now`. Anything but an active
    /// session with every identity key present clears the identity keys.
    pub fn restore(&self, now: DateTime<Utc>) -> Result<SessionStatus> {
        let Some(encrypted) = self.state.get(StateKey::JwtToken)? else {
            return Ok(SessionStatus::Missing);
        };
        let Some(identity) = self.identity()? else {
            self.clear_identity()?;
            return Ok(SessionStatus::Missing);
        };

        let token = match self.secret.decrypt(&encrypted) {
            Ok(token) => token,
            Err(e) => {
                msg_debug!(format!("stored token could not be decrypted: {}", e));
                self.clear_identity()?;
                return Ok(SessionStatus::Unreadable);
            }
        };

        match token_expiry(&token) {
            Some(exp) if exp > now.timestamp() => Ok(SessionStatus::Active { identity, token }),
            Some(_) => {
                self.clear_identity()?;
                Ok(SessionStatus::Expired)
            }
            None => {
                self.clear_identity()?;
                Ok(SessionStatus::Unreadable)
            }
        }
    }

    pub fn clear_identity(&self) -> Result<()> {
        self.state.remove_all(&StateKey::IDENTITY)
    }

    /// Forgets who is logged in and the last screen. The attendance cache stays.
    pub fn logout(&self) -> Result<()> {
        self.clear_identity()?;
        self.state.remove(StateKey::LastActiveScreen)
    }

    pub fn set_last_screen(&self, screen: &str) -> Result<()> {
        self.state.set(StateKey::LastActiveScreen, screen)
    }

    pub fn last_screen(&self) -> Result<Option<String>> {
        self.state.get(StateKey::LastActiveScreen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry_reads_exp_claim() {
        let payload = BASE64_URL_SAFE_NO_PAD.encode(r#"{"sub":"alice","exp":1900000000}"#);
        let token = format!("header.{}.signature", payload);
        assert_eq!(token_expiry(&token), Some(1_900_000_000));
    }

    #[test]
    fn test_token_expiry_rejects_garbage() {
        assert_eq!(token_expiry("not-a-jwt"), None);
        assert_eq!(token_expiry("a.!!!.c"), None);
    }

    #[test]
    fn test_department_label() {
        let admin = UserIdentity {
            user_id: 1,
            username: "root".to_string(),
            role: "ADMIN".to_string(),
        };
        assert_eq!(admin.department(), "Administrator");
        let user = UserIdentity { role: "USER".to_string(), ..admin };
        assert_eq!(user.department(), "General user");
    }
}

#[cfg(test)]
mod tests {
    use base64::prelude::*;
    use chrono::{TimeZone, Utc};
    use kintai::api::LoginResponse;
    use kintai::db::client_state::{ClientState, StateKey};
    use kintai::libs::secret::Secret;
    use kintai::libs::session::{Session, SessionStatus};

    const EXP: i64 = 1_900_000_000;

    fn jwt(exp: i64) -> String {
        let header = BASE64_URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
        let payload = BASE64_URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"alice","exp":{}}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    fn login(token: Option<String>) -> LoginResponse {
        LoginResponse {
            token,
            user_id: 7,
            username: "alice".to_string(),
            role: Some("USER".to_string()),
        }
    }

    fn session() -> Session {
        Session::from_state(ClientState::in_memory().unwrap())
    }

    fn before_expiry() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(EXP - 60, 0).unwrap()
    }

    fn after_expiry() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(EXP + 60, 0).unwrap()
    }

    #[test]
    fn test_login_stores_identity_and_encrypted_token() {
        let session = session();
        let identity = session.save_login(&login(Some(jwt(EXP)))).unwrap();
        assert_eq!(identity.user_id, 7);
        assert_eq!(identity.department(), "General user");

        let stored = session.state().get(StateKey::JwtToken).unwrap().unwrap();
        assert_ne!(stored, jwt(EXP));
        assert_eq!(Secret::new().decrypt(&stored).unwrap(), jwt(EXP));
    }

    #[test]
    fn test_login_without_token_fails() {
        let session = session();
        assert!(session.save_login(&login(None)).is_err());
        assert!(session.save_login(&login(Some(String::new()))).is_err());
        assert_eq!(session.identity().unwrap(), None);
    }

    #[test]
    fn test_restore_active_session() {
        let session = session();
        session.save_login(&login(Some(jwt(EXP)))).unwrap();

        match session.restore(before_expiry()).unwrap() {
            SessionStatus::Active { identity, token } => {
                assert_eq!(identity.username, "alice");
                assert_eq!(token, jwt(EXP));
            }
            other => panic!("expected an active session, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_session_keeps_attendance_cache() {
        let session = session();
        session.save_login(&login(Some(jwt(EXP)))).unwrap();
        session.state().set(StateKey::CurrentClockIn, "09:15").unwrap();
        session.state().set(StateKey::OriginalClockInTime, "09:15").unwrap();

        assert_eq!(session.restore(after_expiry()).unwrap(), SessionStatus::Expired);
        assert_eq!(session.identity().unwrap(), None);
        assert_eq!(session.state().get(StateKey::JwtToken).unwrap(), None);
        assert_eq!(session.state().get(StateKey::CurrentClockIn).unwrap().as_deref(), Some("09:15"));
        assert_eq!(session.state().get(StateKey::OriginalClockInTime).unwrap().as_deref(), Some("09:15"));
    }

    #[test]
    fn test_token_without_exp_is_unreadable() {
        let session = session();
        session.save_login(&login(Some("opaque-token".to_string()))).unwrap();

        assert_eq!(session.restore(before_expiry()).unwrap(), SessionStatus::Unreadable);
        assert_eq!(session.identity().unwrap(), None);
    }

    #[test]
    fn test_garbled_token_is_unreadable() {
        let session = session();
        session.save_login(&login(Some(jwt(EXP)))).unwrap();
        session.state().set(StateKey::JwtToken, "not base64 !!").unwrap();

        assert_eq!(session.restore(before_expiry()).unwrap(), SessionStatus::Unreadable);
        assert_eq!(session.identity().unwrap(), None);
    }

    #[test]
    fn test_nothing_stored() {
        assert_eq!(session().restore(before_expiry()).unwrap(), SessionStatus::Missing);
    }

    #[test]
    fn test_logout_forgets_screen_but_not_cache() {
        let session = session();
        session.save_login(&login(Some(jwt(EXP)))).unwrap();
        session.set_last_screen("schedule").unwrap();
        session.state().set(StateKey::CurrentAttendanceDate, "2025-05-26").unwrap();

        session.logout().unwrap();
        assert_eq!(session.identity().unwrap(), None);
        assert_eq!(session.last_screen().unwrap(), None);
        assert_eq!(session.state().get(StateKey::CurrentAttendanceDate).unwrap().as_deref(), Some("2025-05-26"));
    }
}

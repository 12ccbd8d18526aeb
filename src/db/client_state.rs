use crate::db::db::Db;
use crate::db::migrations::init_with_migrations;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_VALUE: &str = "SELECT value FROM client_state WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO client_state (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP";
const DELETE_VALUE: &str = "DELETE FROM client_state WHERE key = ?1";

/// Keys of the persisted client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    JwtToken,
    CurrentUserId,
    Username,
    UserRole,
    LastActiveScreen,
    CurrentClockIn,
    CurrentClockOut,
    CurrentAttendanceStatus,
    CurrentAttendanceDate,
    OriginalClockInTime,
    CorrectedClockIn,
}

impl StateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::JwtToken => "jwtToken",
            StateKey::CurrentUserId => "currentUserId",
            StateKey::Username => "username",
            StateKey::UserRole => "userRole",
            StateKey::LastActiveScreen => "lastActiveScreen",
            StateKey::CurrentClockIn => "currentClockIn",
            StateKey::CurrentClockOut => "currentClockOut",
            StateKey::CurrentAttendanceStatus => "currentAttendanceStatus",
            StateKey::CurrentAttendanceDate => "currentAttendanceDate",
            StateKey::OriginalClockInTime => "originalClockInTime",
            StateKey::CorrectedClockIn => "correctedClockIn",
        }
    }

    /// Keys that describe who is logged in.
    pub const IDENTITY: [StateKey; 4] = [StateKey::JwtToken, StateKey::CurrentUserId, StateKey::Username, StateKey::UserRole];

    /// Keys that cache today's attendance.
    pub const ATTENDANCE: [StateKey; 5] = [
        StateKey::CurrentClockIn,
        StateKey::CurrentClockOut,
        StateKey::CurrentAttendanceStatus,
        StateKey::CurrentAttendanceDate,
        StateKey::OriginalClockInTime,
    ];
}

/// Durable string key-value state in `kintai.db`.
pub struct ClientState {
    conn: Connection,
}

impl ClientState {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(ClientState { conn: db.conn })
    }

    /// Migrated state that lives only as long as the value.
    pub fn in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;
        Ok(ClientState { conn })
    }

    pub fn get(&self, key: StateKey) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(SELECT_VALUE, [key.as_str()], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: StateKey, value: &str) -> Result<()> {
        self.conn.execute(UPSERT_VALUE, params![key.as_str(), value])?;
        Ok(())
    }

    pub fn remove(&self, key: StateKey) -> Result<()> {
        self.conn.execute(DELETE_VALUE, [key.as_str()])?;
        Ok(())
    }

    /// Stores `value`, or removes the key when it is `None`.
    pub fn put(&self, key: StateKey, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key),
        }
    }

    pub fn remove_all(&self, keys: &[StateKey]) -> Result<()> {
        for key in keys {
            self.remove(*key)?;
        }
        Ok(())
    }
}

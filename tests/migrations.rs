#[cfg(test)]
mod tests {
    use kintai::db::client_state::{ClientState, StateKey};
    use kintai::db::db::Db;
    use kintai::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use rusqlite::Connection;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            MigrationTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_state_survives_reopen(_ctx: &mut MigrationTestContext) {
        let db = Db::new().unwrap();
        assert!(get_db_version(&db.conn).unwrap() > 0);
        assert!(!needs_migration(&db.conn).unwrap());
        drop(db);

        let state = ClientState::new().unwrap();
        state.set(StateKey::LastActiveScreen, "history").unwrap();
        drop(state);

        let state = ClientState::new().unwrap();
        assert_eq!(state.get(StateKey::LastActiveScreen).unwrap().as_deref(), Some("history"));
    }

    #[test]
    fn test_migration_history() {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();
        assert!(needs_migration(&conn).unwrap());

        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        assert_eq!(history.len() as u32, manager.latest_version());
        for (i, entry) in history.iter().enumerate() {
            assert_eq!(entry.0 as usize, i + 1);
        }
        assert!(manager.is_migration_applied(&conn, 1).unwrap());
    }

    #[test]
    fn test_migration_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version1 = get_db_version(&conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();
        let version2 = get_db_version(&conn).unwrap();

        assert_eq!(version1, version2);
    }

    #[test]
    fn test_client_state_keys() {
        let state = ClientState::in_memory().unwrap();
        assert_eq!(state.get(StateKey::Username).unwrap(), None);

        state.set(StateKey::Username, "alice").unwrap();
        state.set(StateKey::Username, "bob").unwrap();
        assert_eq!(state.get(StateKey::Username).unwrap().as_deref(), Some("bob"));

        state.put(StateKey::CurrentClockOut, Some("18:00")).unwrap();
        assert_eq!(state.get(StateKey::CurrentClockOut).unwrap().as_deref(), Some("18:00"));
        state.put(StateKey::CurrentClockOut, None).unwrap();
        assert_eq!(state.get(StateKey::CurrentClockOut).unwrap(), None);

        state.set(StateKey::JwtToken, "t").unwrap();
        state.set(StateKey::CurrentUserId, "7").unwrap();
        state.set(StateKey::CurrentClockIn, "09:00").unwrap();
        state.remove_all(&StateKey::IDENTITY).unwrap();
        assert_eq!(state.get(StateKey::JwtToken).unwrap(), None);
        assert_eq!(state.get(StateKey::Username).unwrap(), None);
        assert_eq!(state.get(StateKey::CurrentClockIn).unwrap().as_deref(), Some("09:00"));
    }
}

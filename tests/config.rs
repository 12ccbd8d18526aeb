#[cfg(test)]
mod tests {
    use kintai::libs::config::{AttendanceConfig, Config, ServerConfig, API_URL_ENV, MAX_SETTING_MINUTES};
    use kintai::libs::work_time::BreakRule;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the data directory at a fresh temporary directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        api_url: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                api_url: "https://attendance.example.com/".to_string(),
            }
        }
    }

    #[test]
    fn test_attendance_defaults() {
        let attendance = Config::default().attendance();
        assert_eq!(attendance.edit_window_minutes, 30);
        assert_eq!(attendance.tick_interval(), Duration::from_secs(1));
        assert_eq!(attendance.reconcile_delay(), Duration::from_millis(500));
        assert_eq!(attendance.message_ttl(), Duration::from_secs(5));
        assert_eq!(attendance.break_threshold_minutes, 360);
        assert_eq!(attendance.break_minutes, 60);
        assert_eq!(attendance.edit_window(), chrono::Duration::minutes(30));
    }

    #[test]
    fn test_zero_tick_interval_is_clamped() {
        let attendance = AttendanceConfig {
            tick_interval_ms: 0,
            ..AttendanceConfig::default()
        };
        assert_eq!(attendance.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_huge_minute_settings_are_clamped() {
        let config: Config =
            serde_json::from_str(r#"{"attendance":{"edit_window_minutes":18446744073709551615,"break_minutes":9223372036854775808}}"#).unwrap();
        let attendance = config.attendance();

        assert_eq!(attendance.window_minutes(), MAX_SETTING_MINUTES as i64);
        assert_eq!(attendance.edit_window(), chrono::Duration::days(1));
        assert_eq!(BreakRule::from(&attendance).break_minutes, MAX_SETTING_MINUTES as i64);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: Config = serde_json::from_str(r#"{"attendance":{"edit_window_minutes":15}}"#).unwrap();
        let attendance = config.attendance();
        assert_eq!(attendance.edit_window_minutes, 15);
        assert_eq!(attendance.message_ttl_secs, 5);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_read_delete(ctx: &mut ConfigTestContext) {
        std::env::remove_var(API_URL_ENV);

        // Nothing on disk yet.
        let config = Config::read().unwrap();
        assert!(config.server.is_none());
        assert_eq!(config.api_url(), None);
        assert!(!Config::delete().unwrap());

        let config = Config {
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
                timeout_secs: 3,
            }),
            attendance: Some(AttendanceConfig {
                edit_window_minutes: 45,
                ..AttendanceConfig::default()
            }),
        };
        config.save().unwrap();

        let read = Config::read().unwrap();
        assert_eq!(read.server, config.server);
        assert_eq!(read.attendance().edit_window_minutes, 45);
        assert_eq!(read.api_url().as_deref(), Some("https://attendance.example.com"));
        assert_eq!(read.timeout(), Duration::from_secs(3));

        std::env::set_var(API_URL_ENV, "http://localhost:8080/");
        assert_eq!(read.api_url().as_deref(), Some("http://localhost:8080"));
        std::env::set_var(API_URL_ENV, "  ");
        assert_eq!(read.api_url().as_deref(), Some("https://attendance.example.com"));
        std::env::remove_var(API_URL_ENV);

        assert!(Config::delete().unwrap());
        assert!(Config::read().unwrap().server.is_none());
    }
}

//! Tests for environment-driven configuration loading.

use figment::Jail;
use kanban_board::config::{ConfigError, KanbanConfig};

#[test]
fn prefixed_env_fills_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("KANBAN_PLATFORM__API_KEY", "key-from-env");
        jail.set_env("KANBAN_SYNC__BOOTSTRAP_MAX_RETRIES", "3");

        let config = KanbanConfig::load().expect("config loads");
        assert_eq!(config.platform.api_key, "key-from-env");
        assert_eq!(config.sync.bootstrap_max_retries, 3);
        assert_eq!(config.sync.bootstrap_retry_delay_ms, 1000);
        Ok(())
    });
}

#[test]
fn legacy_platform_variables_are_recognised() {
    Jail::expect_with(|jail| {
        jail.set_env("NEXT_PUBLIC_API_KEY", "legacy-key");
        jail.set_env("NEXT_PUBLIC_DOMAIN", "legacy.example");
        jail.set_env("NEXT_PUBLIC_PROJECT_ID", "legacy-project");
        jail.set_env("NEXT_PUBLIC_APP_ID", "legacy-app");

        let config = KanbanConfig::load().expect("config loads");
        assert_eq!(config.platform.auth_domain, "legacy.example");
        assert!(config.validate().is_ok());
        assert!(!config.platform.analytics_enabled());
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_legacy_variables() {
    Jail::expect_with(|jail| {
        jail.set_env("NEXT_PUBLIC_API_KEY", "legacy-key");
        jail.set_env("KANBAN_PLATFORM__API_KEY", "current-key");

        let config = KanbanConfig::load().expect("config loads");
        assert_eq!(config.platform.api_key, "current-key");
        Ok(())
    });
}

#[test]
fn config_file_sits_below_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "kanban.toml",
            r#"
            [platform]
            api_key = "file-key"
            project_id = "file-project"

            [storage]
            data_dir = "boards"
            "#,
        )?;
        jail.set_env("KANBAN_PLATFORM__PROJECT_ID", "env-project");

        let config = KanbanConfig::load().expect("config loads");
        assert_eq!(config.platform.api_key, "file-key");
        assert_eq!(config.platform.project_id, "env-project");
        assert_eq!(
            config.storage.data_dir.as_ref().map(|dir| dir.as_str()),
            Some("boards")
        );
        Ok(())
    });
}

#[test]
fn incomplete_platform_settings_fail_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("KANBAN_PLATFORM__API_KEY", "only-a-key");

        let config = KanbanConfig::load().expect("config loads");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField("platform.auth_domain"))
        ));
        Ok(())
    });
}

#[test]
fn zero_bootstrap_retries_is_invalid() {
    Jail::expect_with(|jail| {
        jail.set_env("KANBAN_PLATFORM__API_KEY", "k");
        jail.set_env("KANBAN_PLATFORM__AUTH_DOMAIN", "d");
        jail.set_env("KANBAN_PLATFORM__PROJECT_ID", "p");
        jail.set_env("KANBAN_PLATFORM__APP_ID", "a");
        jail.set_env("KANBAN_SYNC__BOOTSTRAP_MAX_RETRIES", "0");

        let config = KanbanConfig::load().expect("config loads");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
        Ok(())
    });
}

use crate::{AuthzConfig, ConfigError, MAX_TREE_DEPTH, SessionConfig};
use figment::Jail;
use secrecy::{ExposeSecret, Secret};

fn load(dir: &str) -> figment::error::Result<AuthzConfig> {
    AuthzConfig::load(dir).map_err(|e| match e {
        ConfigError::Load(inner) => inner,
        ConfigError::Invalid(msg) => figment::Error::from(msg),
    })
}

#[test]
fn test_session_secret_redaction() {
    let config = SessionConfig {
        secret: Secret::new("hs256-signing-key".to_string()),
        issuer: "hrm-identity".to_string(),
        audience: "hrm-dashboard".to_string(),
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("hs256-signing-key"));
    assert!(debug_output.contains("REDACTED"));
}

#[test]
fn test_defaults_without_files() {
    Jail::expect_with(|_jail| {
        let config = load(".")?;
        assert_eq!(config.app_name, "hrm-dashboard");
        assert!(config.is_development());
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.json);
        assert_eq!(config.tree.max_depth, 64);
        assert!(config.session.is_none());
        assert!(config.routes.is_empty());
        Ok(())
    });
}

#[test]
fn test_environment_file_overrides_default() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
            app_name = "hrm"

            [telemetry]
            log_level = "debug"

            [[routes]]
            key = "/payroll"
            any_of = ["payroll.view", "payroll.process"]

            [[routes]]
            key = "/dashboard"
            "#,
        )?;
        jail.create_file(
            "production.toml",
            r#"
            app_env = "production"

            [telemetry]
            json = true
            "#,
        )?;
        jail.set_env("APP_ENV", "production");

        let config = load(".")?;
        assert_eq!(config.app_name, "hrm");
        assert!(config.is_production());
        assert_eq!(config.telemetry.log_level, "debug");
        assert!(config.telemetry.json);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(
            config.routes[0].any_of.as_deref(),
            Some(&["payroll.view".to_string(), "payroll.process".to_string()][..])
        );
        assert_eq!(config.routes[1].permission, None);
        Ok(())
    });
}

#[test]
fn test_env_vars_override_files() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
            [tree]
            max_depth = 16

            [session]
            secret = "from-file"
            issuer = "hrm-identity"
            audience = "hrm-dashboard"
            "#,
        )?;
        jail.set_env("HRM_TREE__MAX_DEPTH", "8");
        jail.set_env("HRM_SESSION__SECRET", "from-env");

        let config = load(".")?;
        assert_eq!(config.tree.max_depth, 8);
        let session = config.session.expect("session section");
        assert_eq!(session.secret.expose_secret(), "from-env");
        assert_eq!(session.issuer, "hrm-identity");
        Ok(())
    });
}

#[test]
fn test_tree_depth_above_ceiling_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("HRM_TREE__MAX_DEPTH", "1000000");

        let err = AuthzConfig::load(".").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("tree.max_depth"));

        jail.set_env("HRM_TREE__MAX_DEPTH", "0");
        assert!(matches!(
            AuthzConfig::load(".").unwrap_err(),
            ConfigError::Invalid(_)
        ));

        jail.set_env("HRM_TREE__MAX_DEPTH", &MAX_TREE_DEPTH.to_string());
        assert_eq!(load(".")?.tree.max_depth, MAX_TREE_DEPTH);
        Ok(())
    });
}

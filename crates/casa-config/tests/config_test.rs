#![allow(clippy::unwrap_used)]

use std::time::Duration;

use figment::Jail;
use pretty_assertions::assert_eq;

use casa_config::{Config, ConfigError, load_config_from, save_config_to};

#[test]
fn test_missing_file_gives_defaults() {
    Jail::expect_with(|jail| {
        let cfg = load_config_from(&jail.directory().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());

        let runtime = cfg.to_casa_config().unwrap();
        assert_eq!(runtime.request_timeout, Duration::from_secs(15));
        assert_eq!(runtime.probe_timeout, Duration::from_secs(5));
        assert_eq!(runtime.fallbacks.len(), 11);
        Ok(())
    });
}

#[test]
fn test_file_then_env_override() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "casa.toml",
            r#"
                api_url = "http://192.168.1.20:4000"
                fallback_hosts = ["http://casa.local:4000"]
                default_fallbacks = false
                request_timeout_ms = 3000
            "#,
        )?;
        jail.set_env("CASA_PROBE_TIMEOUT_MS", "750");

        let cfg = load_config_from(&jail.directory().join("casa.toml")).unwrap();
        let runtime = cfg.to_casa_config().unwrap();

        assert_eq!(runtime.primary.as_str(), "http://192.168.1.20:4000/");
        assert_eq!(
            runtime
                .fallbacks
                .iter()
                .map(url::Url::as_str)
                .collect::<Vec<_>>(),
            vec!["http://casa.local:4000/"]
        );
        assert_eq!(runtime.request_timeout, Duration::from_millis(3000));
        assert_eq!(runtime.probe_timeout, Duration::from_millis(750));
        Ok(())
    });
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let cfg = Config {
        api_url: "http://10.0.2.2:4000".into(),
        output: "json".into(),
        ..Config::default()
    };

    save_config_to(&cfg, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("api_url = \"http://10.0.2.2:4000\""), "{text}");

    let loaded: Config = toml::from_str(&text).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn test_rejects_non_http_url() {
    let cfg = Config {
        api_url: "ftp://casa.local".into(),
        ..Config::default()
    };
    match cfg.to_casa_config() {
        Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "api_url"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_rejects_zero_timeout() {
    let cfg = Config {
        probe_timeout_ms: 0,
        ..Config::default()
    };
    assert!(matches!(
        cfg.to_casa_config(),
        Err(ConfigError::Validation { .. })
    ));
}

use porter::config::ServerConfig;

#[test]
fn test_config_defaults() {
    let cfg = ServerConfig::default();

    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 9000);
    assert!(!cfg.log_enabled);
}

#[test]
fn test_config_listen_addr() {
    let cfg = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        log_enabled: false,
    };

    assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
}

#[test]
fn test_config_from_env() {
    // Single test covering both default and override so parallel test
    // runs never race on the same variables.
    unsafe {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("LOG_ENABLED");
    }
    let cfg = ServerConfig::load();
    assert_eq!(cfg.port, 9000);
    assert!(!cfg.log_enabled);

    unsafe {
        std::env::set_var("PORT", "3000");
        std::env::set_var("LOG_ENABLED", "true");
    }
    let cfg = ServerConfig::load();
    assert_eq!(cfg.port, 3000);
    assert!(cfg.log_enabled);

    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("LOG_ENABLED");
    }
}

#[test]
fn test_config_from_yaml() {
    let cfg = ServerConfig::from_yaml("host: 127.0.0.1\nport: 8080\nlog_enabled: true\n").unwrap();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert!(cfg.log_enabled);
}

#[test]
fn test_config_from_yaml_defaults_for_missing_fields() {
    let cfg = ServerConfig::from_yaml("port: 8080\n").unwrap();

    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 8080);
    assert!(!cfg.log_enabled);
}

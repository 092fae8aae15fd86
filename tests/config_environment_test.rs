// ABOUTME: Integration tests for environment-based configuration parsing
// ABOUTME: Uses serial execution because environment variables are process-global

use anyhow::Result;
use serial_test::serial;

use onboarding_service::config::environment::{Environment, ServerConfig};

fn clear_config_env() {
    for key in [
        "ENVIRONMENT",
        "HTTP_PORT",
        "LOG_LEVEL",
        "DATABASE_URL",
        "JWT_SECRET",
        "JWT_EXPIRY_HOURS",
        "CORS_ORIGINS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_in_development() -> Result<()> {
    clear_config_env();

    let config = ServerConfig::from_env()?;
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.auth.jwt_expiry_hours, 24);
    assert_eq!(config.security.environment, Environment::Development);
    assert_eq!(config.security.cors_origins, vec!["*".to_string()]);
    assert!(!config.summary().is_empty());

    Ok(())
}

#[test]
#[serial]
fn test_environment_overrides() -> Result<()> {
    clear_config_env();
    std::env::set_var("HTTP_PORT", "9090");
    std::env::set_var("JWT_SECRET", "configured-secret");
    std::env::set_var("JWT_EXPIRY_HOURS", "48");
    std::env::set_var("DATABASE_URL", "sqlite::memory:");
    std::env::set_var("CORS_ORIGINS", "https://a.example, https://b.example");

    let config = ServerConfig::from_env()?;
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.auth.jwt_secret, "configured-secret");
    assert_eq!(config.auth.jwt_expiry_hours, 48);
    assert!(config.database.url.is_memory());
    assert_eq!(
        config.security.cors_origins,
        vec![
            "https://a.example".to_string(),
            "https://b.example".to_string()
        ]
    );

    clear_config_env();
    Ok(())
}

#[test]
#[serial]
fn test_production_requires_jwt_secret() {
    clear_config_env();
    std::env::set_var("ENVIRONMENT", "production");

    assert!(ServerConfig::from_env().is_err());

    std::env::set_var("JWT_SECRET", "production-secret");
    let config = ServerConfig::from_env().expect("config loads with secret");
    assert!(config.security.environment.is_production());

    clear_config_env();
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    clear_config_env();
    std::env::set_var("HTTP_PORT", "not-a-port");

    assert!(ServerConfig::from_env().is_err());

    clear_config_env();
}

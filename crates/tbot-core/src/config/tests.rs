use super::*;

#[test]
fn test_config_defaults_when_sections_missing() {
    let cfg: Config = toml::from_str("").unwrap();
    assert_eq!(cfg.bot.api_base, "https://api.telegram.org");
    assert_eq!(cfg.bot.log_level, "info");
    assert!(cfg.bot.token.is_empty());
    assert_eq!(cfg.http.request_timeout_secs, 30);
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
        [bot]
        token = "123456:ABC-DEF"
        api_base = "http://localhost:8081"

        [http]
        request_timeout_secs = 5
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.bot.token, "123456:ABC-DEF");
    assert_eq!(cfg.bot.api_base, "http://localhost:8081");
    assert_eq!(cfg.bot.log_level, "info");
    assert_eq!(cfg.http.request_timeout_secs, 5);
}

#[test]
fn test_token_masked() {
    let mut bot = BotConfig {
        token: "123456:secret-part".into(),
        ..Default::default()
    };
    assert_eq!(bot.token_masked(), "123456:***");

    bot.token = "garbage".into();
    assert_eq!(bot.token_masked(), "***");

    bot.token = String::new();
    assert_eq!(bot.token_masked(), "");
}

#[test]
fn test_validate_rejects_empty_token() {
    let bot = BotConfig::default();
    let err = bot.validate().unwrap_err();
    assert!(matches!(err, TbotError::Config(_)));
}

#[test]
fn test_validate_rejects_non_http_base() {
    let bot = BotConfig {
        token: "1:x".into(),
        api_base: "api.telegram.org".into(),
        ..Default::default()
    };
    assert!(bot.validate().is_err());

    let ok = BotConfig {
        token: "1:x".into(),
        ..Default::default()
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__tbot_test__/config.toml").unwrap();
    assert_eq!(cfg.bot.api_base, "https://api.telegram.org");
}

#[test]
fn test_load_reads_file() {
    let tmp = std::env::temp_dir().join("__tbot_test_config_load__");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("config.toml");
    std::fs::write(&path, "[bot]\ntoken = \"42:abc\"\n").unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.bot.token, "42:abc");

    std::fs::write(&path, "[bot\ntoken=").unwrap();
    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));

    let _ = std::fs::remove_dir_all(&tmp);
}

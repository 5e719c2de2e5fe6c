use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_uses_defaults_when_empty() {
    let cfg = ClientConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.asset_base_url, DEFAULT_ASSET_BASE_URL);
    assert_eq!(cfg.login_path, "/login");
    assert_eq!(cfg.oauth_provider, OAuthProvider::Discord);
}

#[test]
fn from_lookup_applies_overrides_and_normalizes_slashes() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        (API_BASE_KEY, "https://api.example.test/"),
        (APP_BASE_KEY, "https://app.example.test//"),
        (ASSET_BASE_KEY, "https://cdn.example.test"),
        (LOGIN_PATH_KEY, "/signin"),
        (OAUTH_PROVIDER_KEY, "github"),
    ]))
    .unwrap();

    assert_eq!(cfg.api_base_url, "https://api.example.test");
    assert_eq!(cfg.app_base_url, "https://app.example.test");
    assert_eq!(cfg.asset_base_url, "https://cdn.example.test/");
    assert_eq!(cfg.login_path, "/signin");
    assert_eq!(cfg.oauth_provider, OAuthProvider::GitHub);
}

#[test]
fn from_lookup_rejects_relative_login_path() {
    let err = ClientConfig::from_lookup(lookup_from(&[(LOGIN_PATH_KEY, "login")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidLoginPath("login".to_owned()));
}

#[test]
fn from_lookup_rejects_unknown_provider() {
    let err = ClientConfig::from_lookup(lookup_from(&[(OAUTH_PROVIDER_KEY, "myspace")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownProvider("myspace".to_owned()));
}

#[test]
fn oauth_redirect_uri_joins_app_base_and_login_path() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.oauth_redirect_uri(), "http://localhost:4200/login");
}

#[test]
fn from_build_env_succeeds_without_overrides() {
    assert!(ClientConfig::from_build_env().is_ok());
}

//! OAuth2 entry and callback helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API owns the provider dance. The login screen navigates to
//! [`authorization_url`]; the API later redirects back to the login path with
//! either `?token=...` or `?error=...`, which [`parse_callback`] turns into a
//! typed outcome for the session facade.

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

/// Identity providers registered on the API's OAuth2 client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Discord,
    GitHub,
}

impl OAuthProvider {
    /// Registration id used in the API's authorization path.
    #[must_use]
    pub fn registration_id(self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::GitHub => "github",
        }
    }

    /// Parse a registration id, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "discord" => Some(Self::Discord),
            "github" => Some(Self::GitHub),
            _ => None,
        }
    }
}

/// Outcome carried by the OAuth2 redirect back to the login surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCallback {
    Token(String),
    Error(String),
}

/// Build the API URL that starts the provider authorization flow.
#[must_use]
pub fn authorization_url(api_base_url: &str, provider: OAuthProvider, redirect_uri: &str) -> String {
    format!(
        "{api_base_url}/oauth2/authorization/{}?redirect_uri={redirect_uri}",
        provider.registration_id()
    )
}

/// Parse a callback query string (with or without the leading `?`).
///
/// A non-empty `token` wins over `error`. Returns `None` when neither is set,
/// which is the normal case for a plain visit to the login page.
#[must_use]
pub fn parse_callback(query: &str) -> Option<OAuthCallback> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut token = None;
    let mut error = None;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "token" if token.is_none() => token = Some(decode_component(value)),
            "error" if error.is_none() => error = Some(decode_component(value)),
            _ => {}
        }
    }

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        return Some(OAuthCallback::Token(token));
    }
    error
        .filter(|e| !e.is_empty())
        .map(OAuthCallback::Error)
}

/// Decode `application/x-www-form-urlencoded` escapes (`+` and `%XX`).
/// Malformed escapes are kept literally.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

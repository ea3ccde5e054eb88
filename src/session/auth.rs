//! HTTP Basic authentication header encoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Build the `Authorization` header value for a user/password pair.
///
/// No character validation is done; empty strings yield a well formed
/// header.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

/// Recover the user/password pair from a Basic header value
pub fn decode_basic_auth(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

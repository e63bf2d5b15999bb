// Helper functions for safe logging and header parsing

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer};

/// Masks email addresses for safe logging
///
/// # Example
/// ```
/// use soilguard_api::common::safe_email_log;
///
/// assert_eq!(safe_email_log("farmer@example.com"), "f***@example.com");
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        match parts[0].chars().next() {
            Some(first) if parts.len() == 2 => format!("{}***@{}", first, parts[1]),
            _ => "***@***.***".to_string(),
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Masks tokens for safe logging, keeping the first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 && token.is_ascii() {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Current UTC time in the same shape as the schema's column defaults
/// (`2026-01-01T00:00:00.000Z`)
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Deserializes an optional number sent either as a JSON number or as a
/// numeric string (form inputs arrive as `"1000"`). `null` and blank strings
/// are treated as absent. Use with `#[serde(default)]`.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(de::Error::custom(format!(
                    "expected a number, got \"{}\"",
                    text
                ))),
            }
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is absent, not valid UTF-8, uses another
/// scheme, or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

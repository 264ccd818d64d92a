//! Device activation codes: validation of typed input and extraction from
//! free text or QR payloads.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

pub const MIN_CODE_LEN: usize = 6;
pub const MAX_CODE_LEN: usize = 8;

/// A 6–8 digit activation code. Only constructible via [`validate_code`] or
/// [`extract_code`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActivationCode(String);

impl ActivationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("code is empty")]
    Empty,
    #[error("code must contain only digits")]
    NotDigits,
    #[error("code must be 6 to 8 digits long")]
    BadLength,
}

fn is_code(s: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a typed code. Surrounding whitespace is ignored.
pub fn validate_code(raw: &str) -> Result<ActivationCode, CodeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CodeError::Empty);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodeError::NotDigits);
    }
    if !is_code(trimmed) {
        return Err(CodeError::BadLength);
    }
    Ok(ActivationCode(trimmed.to_owned()))
}

type Strategy = fn(&str) -> Option<String>;

/// URL-structured strategies come first so unrelated digit runs elsewhere in
/// the text are not picked up.
const STRATEGIES: &[Strategy] = &[from_query, from_path_segments, from_patterns];

/// Pull an activation code out of pasted text or a decoded QR payload.
pub fn extract_code(text: &str) -> Option<ActivationCode> {
    let text = text.trim();
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text))
        .map(ActivationCode)
}

fn from_query(text: &str) -> Option<String> {
    let url = Url::parse(text).ok()?;
    ["code", "pin"].iter().find_map(|key| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .filter(|v| is_code(v))
    })
}

fn from_path_segments(text: &str) -> Option<String> {
    let url = Url::parse(text).ok()?;
    url.path_segments()?
        .find(|segment| is_code(segment))
        .map(str::to_owned)
}

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"/tv\d*/(\d{6,8})(?:\D|$)",
        r"code=(\d{6,8})(?:\D|$)",
        r"pin=(\d{6,8})(?:\D|$)",
        r"(?:^|/)(\d{6,8})$",
        r"(?:^|\D)(\d{6,8})(?:\D|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

fn from_patterns(text: &str) -> Option<String> {
    PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

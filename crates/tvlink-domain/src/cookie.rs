//! Cookie records and the normalizer that turns textual cookie exports into them.
//!
//! Accepted inputs, tried in order:
//! 1. records that are already structured,
//! 2. JSON: an array of record objects, or a `{name: value}` object,
//! 3. line text: Netscape `cookies.txt` rows or `name=value` lines.

use serde::{Deserialize, Serialize};

/// Domain assigned when the source format carries none.
pub const DEFAULT_DOMAIN: &str = ".netflix.com";

/// Path assigned when the source format carries none.
pub const DEFAULT_PATH: &str = "/";

/// Minimum tab-separated field count for a Netscape `cookies.txt` row.
const NETSCAPE_FIELDS: usize = 7;

/// One cookie with its scope attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_owned()
}

fn default_path() -> String {
    DEFAULT_PATH.to_owned()
}

impl CookieRecord {
    /// A bare `name=value` pair scoped to the default domain and path.
    pub fn bare(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: default_domain(),
            path: default_path(),
            secure: false,
            http_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    #[error("could not parse cookie file")]
    Unparseable,
}

/// Raw normalizer input.
#[derive(Debug, Clone)]
pub enum CookieInput {
    Records(Vec<CookieRecord>),
    Text(String),
}

/// A text strategy returns `None` when the input is not in its format, and
/// `Some(records)` (possibly empty) when it claims the input.
type TextStrategy = fn(&str) -> Option<Vec<CookieRecord>>;

const TEXT_STRATEGIES: &[TextStrategy] = &[parse_json, parse_lines];

/// Normalize any supported cookie export into an ordered, name-unique record list.
pub fn normalize(input: CookieInput) -> Result<Vec<CookieRecord>, CookieError> {
    let records = match input {
        CookieInput::Records(records) => records,
        CookieInput::Text(text) => TEXT_STRATEGIES
            .iter()
            .find_map(|strategy| strategy(&text))
            .unwrap_or_default(),
    };
    let records = dedupe_by_name(records);
    if records.is_empty() {
        return Err(CookieError::Unparseable);
    }
    Ok(records)
}

/// Last write wins; the surviving record keeps the first-seen position.
fn dedupe_by_name(records: Vec<CookieRecord>) -> Vec<CookieRecord> {
    let mut out: Vec<CookieRecord> = Vec::with_capacity(records.len());
    for record in records {
        match out.iter_mut().find(|existing| existing.name == record.name) {
            Some(existing) => *existing = record,
            None => out.push(record),
        }
    }
    out
}

fn parse_json(text: &str) -> Option<Vec<CookieRecord>> {
    match serde_json::from_str::<serde_json::Value>(text).ok()? {
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        serde_json::Value::Object(map) => Some(
            map.into_iter()
                .map(|(name, value)| {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    CookieRecord::bare(name, value)
                })
                .collect(),
        ),
        _ => None,
    }
}

fn parse_lines(text: &str) -> Option<Vec<CookieRecord>> {
    let records = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| parse_netscape_line(line).or_else(|| parse_pair_line(line)))
        .collect();
    Some(records)
}

fn parse_netscape_line(line: &str) -> Option<CookieRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < NETSCAPE_FIELDS {
        return None;
    }
    Some(CookieRecord {
        domain: fields[0].to_owned(),
        http_only: fields[1].eq_ignore_ascii_case("true"),
        path: fields[2].to_owned(),
        secure: fields[3].eq_ignore_ascii_case("true"),
        name: fields[5].to_owned(),
        value: fields[6].to_owned(),
    })
}

fn parse_pair_line(line: &str) -> Option<CookieRecord> {
    let (name, value) = line.split_once('=')?;
    Some(CookieRecord::bare(name.trim(), value.trim()))
}

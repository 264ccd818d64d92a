//! Activation and session-check result types.

use serde::{Deserialize, Serialize};

/// Placeholder for account fields the backend could not determine.
pub const UNKNOWN: &str = "Unknown";

/// How an activation attempt's outcome was classified.
///
/// `Ambiguous` means the backend answered without a recognizable success or
/// failure marker. The upstream service does not always confirm synchronously,
/// so callers treat it as a provisional success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationOutcome {
    Activated,
    Rejected,
    Ambiguous,
}

impl ActivationOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Activated | Self::Ambiguous)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activated => "activated",
            Self::Rejected => "rejected",
            Self::Ambiguous => "ambiguous",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "activated" => Some(Self::Activated),
            "rejected" => Some(Self::Rejected),
            "ambiguous" => Some(Self::Ambiguous),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationReport {
    pub outcome: ActivationOutcome,
    pub message: String,
}

impl ActivationReport {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            outcome: ActivationOutcome::Rejected,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// How an attempt's code was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationMethod {
    #[default]
    Manual,
    QrScan,
    Upload,
}

impl ActivationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::QrScan => "qr_scan",
            Self::Upload => "upload",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "qr_scan" => Some(Self::QrScan),
            "upload" => Some(Self::Upload),
            _ => None,
        }
    }
}

/// Last known validity of a stored cookie set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }

    /// Unrecognized values read as `Unknown`.
    pub fn from_db(s: &str) -> Self {
        match s {
            "valid" => Self::Valid,
            "invalid" => Self::Invalid,
            _ => Self::Unknown,
        }
    }
}

/// Result of checking whether a cookie set still represents a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCheck {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl SessionCheck {
    pub fn failed(err: impl Into<String>) -> Self {
        Self {
            ok: false,
            plan: None,
            country: None,
            member_since: None,
            err: Some(err.into()),
        }
    }

    /// Fill absent account fields of a successful check with [`UNKNOWN`].
    pub fn with_defaults(mut self) -> Self {
        if self.ok {
            for field in [&mut self.plan, &mut self.country, &mut self.member_since] {
                if field.is_none() {
                    *field = Some(UNKNOWN.to_owned());
                }
            }
        }
        self
    }

    pub fn status(&self) -> ValidationStatus {
        if self.ok {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        }
    }
}

//! Flash notice entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a notice, mapped to the `notice-*` CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    #[default]
    Info,
    Success,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Warning,
        Severity::Error,
        Severity::Info,
        Severity::Success,
    ];

    /// Parse a severity name; anything unknown falls back to `Info`
    pub fn from_str_lossy(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A one-time status message shown on the next page load
///
/// Serialized as the 3-tuple `[message, severity, dismissible]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, bool)", into = "(String, Severity, bool)")]
pub struct Notice {
    message: String,
    severity: Severity,
    dismissible: bool,
}

impl Notice {
    /// Create a dismissible notice
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            dismissible: true,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_dismissible(&self) -> bool {
        self.dismissible
    }
}

impl From<(String, String, bool)> for Notice {
    fn from((message, severity, dismissible): (String, String, bool)) -> Self {
        Self {
            message,
            severity: Severity::from_str_lossy(&severity),
            dismissible,
        }
    }
}

impl From<Notice> for (String, Severity, bool) {
    fn from(notice: Notice) -> Self {
        (notice.message, notice.severity, notice.dismissible)
    }
}

/// Opaque token identifying the browser session a notice is delivered to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a token presented by a client; malformed tokens are rejected
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim())
            .ok()
            .map(|uuid| Self(uuid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one representation in a data package.
///
/// Standard formats have dedicated constructors; any other MIME-like type
/// announced by the native layer is kept verbatim as a custom format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatId(pub String);

impl FormatId {
    pub fn storage_items() -> Self {
        Self("StorageItems".into())
    }
    pub fn bitmap() -> Self {
        Self("Bitmap".into())
    }
    pub fn web_link() -> Self {
        Self("WebLink".into())
    }
    pub fn text() -> Self {
        Self("Text".into())
    }
    pub fn html() -> Self {
        Self("Html".into())
    }
    pub fn rtf() -> Self {
        Self("Rtf".into())
    }

    pub fn custom(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FormatId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

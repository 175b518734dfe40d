//! Transferable item descriptors announced by a session begin event.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a transferable item, as reported by the browser's `DataTransferItem.kind`.
///
/// Matching is case-insensitive. Kinds other than `file` and `string`
/// cannot be retrieved from the native layer and are kept as
/// [`DataItemKind::Other`] only so they can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataItemKind {
    File,
    String,
    Other(String),
}

impl From<String> for DataItemKind {
    fn from(kind: String) -> Self {
        if kind.eq_ignore_ascii_case("file") {
            Self::File
        } else if kind.eq_ignore_ascii_case("string") {
            Self::String
        } else {
            Self::Other(kind)
        }
    }
}

impl From<&str> for DataItemKind {
    fn from(kind: &str) -> Self {
        Self::from(kind.to_string())
    }
}

impl From<DataItemKind> for String {
    fn from(kind: DataItemKind) -> Self {
        match kind {
            DataItemKind::File => "file".to_string(),
            DataItemKind::String => "string".to_string(),
            DataItemKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for DataItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::String => f.write_str("string"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// One transferable item of a native drag session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataItemDescriptor {
    /// Index of the item, unique within its session.
    pub id: u32,
    pub kind: DataItemKind,
    /// MIME-like type, e.g. `text/uri-list` or `image/png`.
    #[serde(rename = "type", default)]
    pub mime: String,
}

impl DataItemDescriptor {
    pub fn new(id: u32, kind: impl Into<DataItemKind>, mime: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            mime: mime.into(),
        }
    }

    /// Parses the JSON array marshalled by the native layer.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_image(&self) -> bool {
        self.mime
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }
}

impl fmt::Display for DataItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[#{}: {} {}]", self.id, self.kind, self.mime)
    }
}

use serde::{Deserialize, Serialize};
use url::Url;

use crate::data_package::PayloadError;
use crate::ports::NativeStorageItemInfo;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StorageItemKind {
    File,
    Folder,
}

/// Handle on a file or folder dropped from outside the application.
///
/// The handle only carries what the native layer reported; reading the
/// file content goes through the native layer again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageItem {
    /// Opaque id of the item in the native layer.
    pub native_id: String,
    pub name: String,
    pub path: Option<String>,
    pub content_type: Option<String>,
    pub kind: StorageItemKind,
}

impl StorageItem {
    pub fn is_file(&self) -> bool {
        self.kind == StorageItemKind::File
    }
}

impl From<NativeStorageItemInfo> for StorageItem {
    fn from(info: NativeStorageItemInfo) -> Self {
        Self {
            native_id: info.id,
            name: info.name,
            path: info.path,
            content_type: info.content_type,
            kind: if info.is_file {
                StorageItemKind::File
            } else {
                StorageItemKind::Folder
            },
        }
    }
}

/// Stream reference over a single dropped file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamReference {
    file: StorageItem,
}

impl StreamReference {
    pub fn from_file(file: StorageItem) -> Result<Self, PayloadError> {
        if !file.is_file() {
            return Err(PayloadError::NotAFile(file.name));
        }
        Ok(Self { file })
    }

    pub fn file(&self) -> &StorageItem {
        &self.file
    }

    pub fn content_type(&self) -> Option<&str> {
        self.file.content_type.as_deref()
    }
}

/// Content produced by a data provider.
#[derive(Debug, Clone, PartialEq)]
pub enum DataContent {
    StorageItems(Vec<StorageItem>),
    Bitmap(StreamReference),
    WebLink(Url),
    /// Plain, HTML, RTF or custom text, as fetched.
    Text(String),
}

impl DataContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_storage_items(&self) -> Option<&[StorageItem]> {
        match self {
            Self::StorageItems(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_web_link(&self) -> Option<&Url> {
        match self {
            Self::WebLink(url) => Some(url),
            _ => None,
        }
    }

    pub fn as_bitmap(&self) -> Option<&StreamReference> {
        match self {
            Self::Bitmap(stream) => Some(stream),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(is_file: bool) -> NativeStorageItemInfo {
        NativeStorageItemInfo {
            id: "native-7".to_string(),
            name: "photo.png".to_string(),
            path: None,
            content_type: Some("image/png".to_string()),
            is_file,
        }
    }

    #[test]
    fn storage_item_keeps_native_info() {
        let item = StorageItem::from(info(true));
        assert_eq!(item.native_id, "native-7");
        assert_eq!(item.kind, StorageItemKind::File);
        assert_eq!(item.content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn stream_reference_requires_a_file() {
        let folder = StorageItem::from(info(false));
        assert!(matches!(
            StreamReference::from_file(folder),
            Err(PayloadError::NotAFile(name)) if name == "photo.png"
        ));

        let stream = StreamReference::from_file(StorageItem::from(info(true))).unwrap();
        assert_eq!(stream.content_type(), Some("image/png"));
    }
}

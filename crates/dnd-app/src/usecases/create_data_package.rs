//! Payload resolver
//!
//! Turns the data items announced by a `dragenter` into a [`DataPackage`]
//! of lazy providers. Nothing is fetched here: the native layer is only
//! queried when a consumer asks for a format.
//!
//! ## Coverage
//!
//! - `file` items: one `StorageItems` provider fetching every file in a
//!   single batch, plus a `Bitmap` provider over the first `image/*` file.
//!   Browsers have no common image kind, so a dragged file is the only way
//!   to get a bitmap.
//! - `string` items: standard text formats for `text/uri-list`,
//!   `text/plain`, `text/html` and `text/rtf`; any other type is exposed
//!   verbatim as a custom format.
//! - Any other kind (e.g. `other` when dragging an image inside the same
//!   page on Firefox) is dropped: its content cannot be retrieved from the
//!   native layer.
//!
//! Text providers time out with `tokio::time::sleep`: consumers must poll
//! them from a Tokio runtime with the time driver enabled.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use dnd_core::ports::{NativeDragHostPort, NativeStorageItemInfo};
use dnd_core::{
    DataContent, DataItemDescriptor, DataItemKind, DataPackage, FormatId, PayloadError,
    StorageItem, StreamReference,
};

/// Upper bound of a single text fetch, composed with the consumer's token.
pub const TEXT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the data package of a native drag session.
/// 构建原生拖拽会话的数据包。
#[derive(Clone)]
pub struct CreateDataPackage {
    host: Arc<dyn NativeDragHostPort>,
}

impl CreateDataPackage {
    pub fn new(host: Arc<dyn NativeDragHostPort>) -> Self {
        Self { host }
    }

    /// Registers one provider per resolvable format of `data_items`.
    ///
    /// `data_items` is only filled on `dragenter`; `None` is a contract
    /// violation reported as [`PayloadError::MissingDataItems`].
    pub fn execute(
        &self,
        data_items: Option<&[DataItemDescriptor]>,
    ) -> Result<DataPackage, PayloadError> {
        let items = data_items.ok_or(PayloadError::MissingDataItems)?;

        let mut package = DataPackage::new();
        let mut files = Vec::new();
        let mut texts = Vec::new();
        for item in items {
            match item.kind {
                DataItemKind::File => files.push(item),
                DataItemKind::String => texts.push(item),
                DataItemKind::Other(_) => {
                    debug!("Dropping data item {} of unsupported kind", item);
                }
            }
        }

        if !files.is_empty() {
            self.register_files(&mut package, &files);
        }

        for text in texts {
            self.register_text(&mut package, text);
        }

        Ok(package)
    }

    fn register_files(&self, package: &mut DataPackage, files: &[&DataItemDescriptor]) {
        let ids: Arc<[u32]> = files.iter().map(|file| file.id).collect();
        let host = self.host.clone();
        package.set_data_provider(FormatId::storage_items(), move |token| {
            let host = host.clone();
            let ids = ids.clone();
            async move {
                let items = retrieve_files(host.as_ref(), &ids, token).await?;
                Ok(DataContent::StorageItems(items))
            }
        });

        // First match wins.
        if let Some(image) = files.iter().find(|file| file.is_image()) {
            let id = image.id;
            let host = self.host.clone();
            package.set_data_provider(FormatId::bitmap(), move |token| {
                let host = host.clone();
                async move {
                    let mut items = retrieve_files(host.as_ref(), &[id], token).await?;
                    if items.len() != 1 {
                        return Err(PayloadError::UnexpectedItemCount {
                            expected: 1,
                            actual: items.len(),
                        });
                    }
                    let stream = StreamReference::from_file(items.remove(0))?;
                    Ok(DataContent::Bitmap(stream))
                }
            });
        }
    }

    fn register_text(&self, package: &mut DataPackage, text: &DataItemDescriptor) {
        let id = text.id;
        let host = self.host.clone();

        // https://datatracker.ietf.org/doc/html/rfc2483#section-5
        if text.mime == "text/uri-list" {
            package.set_data_provider(FormatId::web_link(), move |token| {
                let host = host.clone();
                async move {
                    let list = retrieve_text(host.as_ref(), id, token).await?;
                    Ok(DataContent::WebLink(first_uri(&list)?))
                }
            });
            return;
        }

        let format = match text.mime.as_str() {
            "text/plain" => FormatId::text(),
            "text/html" => FormatId::html(),
            "text/rtf" => FormatId::rtf(),
            custom => FormatId::custom(custom),
        };
        package.set_data_provider(format, move |token| {
            let host = host.clone();
            async move {
                let text = retrieve_text(host.as_ref(), id, token).await?;
                Ok(DataContent::Text(text))
            }
        });
    }
}

async fn retrieve_files(
    host: &dyn NativeDragHostPort,
    ids: &[u32],
    token: CancellationToken,
) -> Result<Vec<StorageItem>, PayloadError> {
    let raw = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(PayloadError::Cancelled),
        raw = host.retrieve_files(ids) => raw?,
    };

    let infos: Vec<NativeStorageItemInfo> = serde_json::from_str(&raw)?;
    Ok(infos.into_iter().map(StorageItem::from).collect())
}

async fn retrieve_text(
    host: &dyn NativeDragHostPort,
    id: u32,
    token: CancellationToken,
) -> Result<String, PayloadError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(PayloadError::Cancelled),
        _ = tokio::time::sleep(TEXT_FETCH_TIMEOUT) => Err(PayloadError::Timeout(TEXT_FETCH_TIMEOUT)),
        text = host.retrieve_text(id) => Ok(text?),
    }
}

/// First URI of a `text/uri-list`, skipping comment lines.
fn first_uri(list: &str) -> Result<Url, PayloadError> {
    let line = list
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .find(|line| !line.starts_with('#'))
        .ok_or(PayloadError::EmptyUriList)?;

    Ok(Url::parse(line)?)
}

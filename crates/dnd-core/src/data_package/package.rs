use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::data_package::{DataContent, FormatId, PayloadError};

pub type ProviderFuture = BoxFuture<'static, Result<DataContent, PayloadError>>;

/// Deferred computation producing the content of one format.
pub type DataProvider = Arc<dyn Fn(CancellationToken) -> ProviderFuture + Send + Sync>;

/// Mutable package of lazily provided formats.
#[derive(Default, Clone)]
pub struct DataPackage {
    providers: BTreeMap<FormatId, DataProvider>,
}

impl DataPackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the provider of `format`, replacing any previous one.
    pub fn set_data_provider<F, Fut>(&mut self, format: FormatId, provider: F)
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<DataContent, PayloadError>> + Send + 'static,
    {
        let provider: DataProvider =
            Arc::new(move |token| -> ProviderFuture { Box::pin(provider(token)) });
        self.providers.insert(format, provider);
    }

    pub fn contains(&self, format: &FormatId) -> bool {
        self.providers.contains_key(format)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Read-only view handed to the drag/drop manager.
    pub fn get_view(&self) -> DataPackageView {
        DataPackageView {
            providers: Arc::new(self.providers.clone()),
        }
    }
}

impl fmt::Debug for DataPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataPackage")
            .field("formats", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Read-only, cheaply cloneable view on a [`DataPackage`].
#[derive(Clone, Default)]
pub struct DataPackageView {
    providers: Arc<BTreeMap<FormatId, DataProvider>>,
}

impl DataPackageView {
    pub fn available_formats(&self) -> Vec<FormatId> {
        self.providers.keys().cloned().collect()
    }

    pub fn contains(&self, format: &FormatId) -> bool {
        self.providers.contains_key(format)
    }

    /// Fetches the content of `format`.
    ///
    /// The provider is invoked once per call; results are not cached.
    /// Cancelling `token` aborts the fetch with [`PayloadError::Cancelled`].
    ///
    /// # Runtime
    ///
    /// Providers may race a Tokio timer against the native layer, so the
    /// returned future must be polled inside a Tokio runtime with the time
    /// driver enabled (`#[tokio::main]`, or a `Builder` with
    /// `enable_time()`). Polling it elsewhere panics.
    pub async fn get_data(
        &self,
        format: &FormatId,
        token: CancellationToken,
    ) -> Result<DataContent, PayloadError> {
        let provider = self
            .providers
            .get(format)
            .ok_or_else(|| PayloadError::FormatNotAvailable(format.clone()))?;

        provider(token).await
    }

    pub async fn get_text(
        &self,
        format: &FormatId,
        token: CancellationToken,
    ) -> Result<String, PayloadError> {
        match self.get_data(format, token).await? {
            DataContent::Text(text) => Ok(text),
            _ => Err(PayloadError::FormatNotAvailable(format.clone())),
        }
    }
}

impl fmt::Debug for DataPackageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataPackageView")
            .field("formats", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

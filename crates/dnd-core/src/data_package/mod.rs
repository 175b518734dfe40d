//! Lazily resolved drag payload
//!
//! A [`DataPackage`] maps format identifiers to deferred providers. Nothing
//! is fetched when the package is built: each call to
//! [`DataPackageView::get_data`] invokes the provider of the requested
//! format exactly once, with the consumer's cancellation token.
//!
//! ```text
//! dragenter data items
//!      ↓
//! payload resolver (registers providers only)
//!      ↓
//! DataPackage ──get_view()──→ DataPackageView (handed to the manager)
//!      ↓ get_data(format, token)
//! provider future ──→ native host port
//! ```

mod content;
mod error;
mod format;
mod package;

pub use content::{DataContent, StorageItem, StorageItemKind, StreamReference};
pub use error::PayloadError;
pub use format::FormatId;
pub use package::{DataPackage, DataPackageView, DataProvider, ProviderFuture};

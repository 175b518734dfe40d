//! Native drag event envelope
//!
//! One [`DragEnvelope`] describes one lifecycle notification of a native
//! drag session, as delivered by the native layer. Envelopes are never
//! mutated: the tracker swaps its stored copy wholesale on each update.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data_item::DataItemDescriptor;
use crate::operation::DataPackageOperation;
use crate::pointer::{Point, PointerButtons};

/// Identifier assigned by the native layer to one drag gesture.
///
/// 原生层为一次拖拽手势分配的标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeDragId(pub i32);

impl NativeDragId {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NativeDragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i32> for NativeDragId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Lifecycle stage carried by an envelope.
///
/// 信封携带的生命周期阶段。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    /// `dragenter`: a native drag entered the view.
    Begin,
    /// `dragover`: the pointer moved over the view.
    Move,
    /// `dragleave`: the pointer left the view.
    Leave,
    /// `drop`: the user released the pointer over the view.
    End,
    /// `result`: response sent back to the native layer.
    Result,
    /// Any event name this bridge does not know about.
    Unknown(String),
}

impl DragEventKind {
    pub fn from_native(name: &str) -> Self {
        match name {
            "dragenter" => Self::Begin,
            "dragover" => Self::Move,
            "dragleave" => Self::Leave,
            "drop" => Self::End,
            "result" => Self::Result,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_native(&self) -> &str {
        match self {
            Self::Begin => "dragenter",
            Self::Move => "dragover",
            Self::Leave => "dragleave",
            Self::End => "drop",
            Self::Result => "result",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for DragEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_native())
    }
}

/// Typed form of one native drag notification.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEnvelope {
    pub kind: DragEventKind,
    pub id: NativeDragId,
    /// Monotonic timestamp in milliseconds, as reported by the native layer.
    pub timestamp: f64,
    /// Pointer position in the root coordinate space.
    pub position: Point,
    pub buttons: PointerButtons,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Native `effectAllowed` token, only present on [`DragEventKind::Begin`].
    pub allowed_operations: Option<String>,
    /// Native `dropEffect` token.
    pub accepted_operation: Option<String>,
    /// Transferable items, only present on [`DragEventKind::Begin`].
    pub data_items: Option<Vec<DataItemDescriptor>>,
}

impl DragEnvelope {
    /// Builds the response envelope for this event.
    ///
    /// When `accepted` is `None` no decision was made and the incoming
    /// accepted operation is echoed unchanged. Allowed operations and data
    /// items only flow from the native layer, so they are left empty.
    pub fn to_result(&self, accepted: Option<DataPackageOperation>) -> DragEnvelope {
        DragEnvelope {
            kind: DragEventKind::Result,
            id: self.id,
            timestamp: self.timestamp,
            position: self.position,
            buttons: self.buttons,
            shift: self.shift,
            ctrl: self.ctrl,
            alt: self.alt,
            allowed_operations: None,
            accepted_operation: match accepted {
                Some(operation) => Some(operation.to_native().to_string()),
                None => self.accepted_operation.clone(),
            },
            data_items: None,
        }
    }
}

impl fmt::Display for DragEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut modifiers = Vec::new();
        if self.shift {
            modifiers.push("shift");
        }
        if self.ctrl {
            modifiers.push("ctrl");
        }
        if self.alt {
            modifiers.push("alt");
        }
        if modifiers.is_empty() {
            modifiers.push("none");
        }

        let allowed = self.allowed_operations.as_deref();
        write!(
            f,
            "[{}] {} {:.0} @({:.2},{:.2}) | buttons: {:?} | modifiers: {} | allowed: {} ({:?}) | accepted: {}",
            self.kind,
            self.id,
            self.timestamp,
            self.position.x,
            self.position.y,
            self.buttons,
            modifiers.join(", "),
            allowed.unwrap_or(""),
            DataPackageOperation::from_native(allowed),
            self.accepted_operation.as_deref().unwrap_or(""),
        )?;

        if let Some(items) = &self.data_items {
            let entries: Vec<String> = items.iter().map(ToString::to_string).collect();
            write!(f, " | entries: {}", entries.join(", "))?;
        }

        Ok(())
    }
}

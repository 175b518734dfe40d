//! Interop buffer shared with the native layer.
//!
//! The native layer cannot pass arguments to the dispatch callback: it
//! serializes the event into the buffer, invokes the parameterless
//! callback, then reads the response the callback left in the same
//! buffer.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use dnd_core::ports::{DragEventChannelPort, EventChannelError};
use dnd_core::{DataItemDescriptor, DragEnvelope, DragEventKind, NativeDragId, Point, PointerButtons};

/// Drag event as marshalled by the native layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeDragEventArgs {
    pub event_name: String,
    #[serde(default)]
    pub allowed_operations: Option<String>,
    #[serde(default)]
    pub accepted_operation: Option<String>,
    /// JSON array of data item descriptors, filled only for `dragenter`.
    #[serde(default)]
    pub data_items: Option<String>,
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub id: i32,
    #[serde(default)]
    pub buttons: u32,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
}

impl NativeDragEventArgs {
    /// Converts the marshalled event into a domain envelope.
    ///
    /// A missing or blank `dataItems` means the event carries no items.
    pub fn into_envelope(self) -> Result<DragEnvelope, serde_json::Error> {
        let data_items = match self.data_items.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(json) => Some(DataItemDescriptor::parse_list(json)?),
        };

        Ok(DragEnvelope {
            kind: DragEventKind::from_native(&self.event_name),
            id: NativeDragId(self.id),
            timestamp: self.timestamp,
            position: Point::new(self.x, self.y),
            buttons: PointerButtons::from_bits_truncate(self.buttons),
            shift: self.shift,
            ctrl: self.ctrl,
            alt: self.alt,
            allowed_operations: self.allowed_operations,
            accepted_operation: self.accepted_operation,
            data_items,
        })
    }

    /// Marshals a domain envelope back for the native layer.
    pub fn from_envelope(envelope: &DragEnvelope) -> Result<Self, serde_json::Error> {
        let data_items = match &envelope.data_items {
            Some(items) => serde_json::to_string(items)?,
            None => String::new(),
        };

        Ok(Self {
            event_name: envelope.kind.as_native().to_string(),
            allowed_operations: Some(envelope.allowed_operations.clone().unwrap_or_default()),
            accepted_operation: envelope.accepted_operation.clone(),
            data_items: Some(data_items),
            timestamp: envelope.timestamp,
            x: envelope.position.x,
            y: envelope.position.y,
            id: envelope.id.value(),
            buttons: envelope.buttons.bits(),
            shift: envelope.shift,
            ctrl: envelope.ctrl,
            alt: envelope.alt,
        })
    }
}

impl fmt::Display for NativeDragEventArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers: Vec<&str> = [(self.shift, "shift"), (self.ctrl, "ctrl"), (self.alt, "alt")]
            .into_iter()
            .filter_map(|(pressed, name)| pressed.then_some(name))
            .collect();

        write!(
            f,
            "[{}] #{} {:.0} @({:.2},{:.2}) | buttons: {:?} | modifiers: {} | allowed: {} | accepted: {} | entries: {}",
            self.event_name,
            self.id,
            self.timestamp,
            self.x,
            self.y,
            PointerButtons::from_bits_truncate(self.buttons),
            if modifiers.is_empty() { "none".to_string() } else { modifiers.join(", ") },
            self.allowed_operations.as_deref().unwrap_or(""),
            self.accepted_operation.as_deref().unwrap_or(""),
            self.data_items.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InteropError {
    #[error("the interop buffer holds no response")]
    Empty,

    #[error("invalid interop payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Default)]
struct Slots {
    event: Option<String>,
    response: Option<String>,
}

/// Buffer the native layer and the dispatch callback exchange events through.
///
/// 原生层与分发回调之间交换事件的缓冲区。
#[derive(Default)]
pub struct InteropBuffer {
    slots: Mutex<Slots>,
}

impl InteropBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the serialized event for the next dispatch.
    ///
    /// Any response left by a previous dispatch is discarded.
    pub fn write_event(&self, json: impl Into<String>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.event = Some(json.into());
        slots.response = None;
    }

    /// Serializes `args` and stores them for the next dispatch.
    pub fn write_args(&self, args: &NativeDragEventArgs) -> Result<(), InteropError> {
        self.write_event(serde_json::to_string(args)?);
        Ok(())
    }

    /// Takes the serialized response of the last dispatch.
    pub fn take_response(&self) -> Result<String, InteropError> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .response
            .take()
            .ok_or(InteropError::Empty)
    }

    /// Takes and decodes the response of the last dispatch.
    pub fn take_response_args(&self) -> Result<NativeDragEventArgs, InteropError> {
        let json = self.take_response()?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl DragEventChannelPort for InteropBuffer {
    fn take_event(&self) -> Result<DragEnvelope, EventChannelError> {
        let json = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .event
            .take()
            .ok_or(EventChannelError::Empty)?;

        let args: NativeDragEventArgs = serde_json::from_str(&json)
            .map_err(|e| EventChannelError::Malformed(e.to_string()))?;
        debug!("Native drag event received: {}", args);

        args.into_envelope()
            .map_err(|e| EventChannelError::Malformed(format!("dataItems: {e}")))
    }

    fn post_result(&self, response: DragEnvelope) -> Result<(), EventChannelError> {
        let args = NativeDragEventArgs::from_envelope(&response)
            .map_err(|e| EventChannelError::Malformed(e.to_string()))?;
        let json =
            serde_json::to_string(&args).map_err(|e| EventChannelError::Malformed(e.to_string()))?;

        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .response = Some(json);
        Ok(())
    }
}

use crate::envelope::DragEnvelope;

/// Port to the shared buffer the native layer marshals drag events through.
///
/// 原生层传递拖拽事件所用的共享缓冲区端口。
///
/// The native layer writes one event into the buffer, invokes the
/// parameterless dispatch callback, then reads the response back from the
/// same buffer.
pub trait DragEventChannelPort: Send + Sync {
    /// Takes the event written by the native layer.
    fn take_event(&self) -> Result<DragEnvelope, EventChannelError>;

    /// Writes the response the native layer reads once dispatch returns.
    fn post_result(&self, response: DragEnvelope) -> Result<(), EventChannelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EventChannelError {
    #[error("no native drag event is pending in the interop buffer")]
    Empty,

    #[error("malformed native drag event: {0}")]
    Malformed(String),
}

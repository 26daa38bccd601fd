//! Summarizer engine: upload transport, timers, clipboard and file IO.
mod clipboard;
mod engine;
mod load;
mod persist;
mod types;
mod upload;

pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use engine::{EngineError, EngineHandle};
pub use load::{load_file, LoadError, LoadedFile};
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use types::{EngineEvent, RequestId, Stage, UploadProgress};
pub use upload::{
    content_type_for, extract_summary, ChannelEventSink, EventSink, ReqwestUploader, UploadError,
    UploadSettings, Uploader, DEFAULT_BASE_URL, DEFAULT_UPLOAD_PATH, FILE_FIELD,
};

use std::sync::Arc;
use std::time::Duration;

/// Side effects requested by [`crate::update`]; executed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the file as multipart field `file` to the upload endpoint.
    Upload {
        request_id: crate::RequestId,
        file_name: String,
        content: Arc<[u8]>,
    },
    /// Deliver `Msg::ProgressResetElapsed` after `delay`.
    ScheduleProgressReset {
        request_id: crate::RequestId,
        delay: Duration,
    },
    /// Best effort; failures never come back as messages.
    CopyToClipboard { text: String },
}

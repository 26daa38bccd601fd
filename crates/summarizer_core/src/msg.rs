use crate::{RequestId, Selection, UPLOAD_FAILED_FALLBACK};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User chose a file, or dismissed the picker without one.
    FileSelected(Option<Selection>),
    /// User asked for the current selection to be summarized.
    SubmitClicked,
    /// User asked for the summary to be copied.
    CopyClicked,
    /// Engine: response head arrived for a request.
    UploadResponded { request_id: RequestId },
    /// Engine: request reached a terminal outcome.
    ///
    /// `Ok(None)` means the service answered without a usable `summary` field.
    UploadFinished {
        request_id: RequestId,
        result: Result<Option<String>, UploadFailure>,
    },
    /// Timer scheduled by `Effect::ScheduleProgressReset` fired.
    ProgressResetElapsed { request_id: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// Non-2xx response; the body is never inspected.
    HttpStatus(u16),
    /// Transport or decoding failure, with the underlying message when there is one.
    Transport { message: Option<String> },
}

impl UploadFailure {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            UploadFailure::HttpStatus(code) => format!("Server responded {code}"),
            UploadFailure::Transport { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .unwrap_or(UPLOAD_FAILED_FALLBACK)
                .to_string(),
        }
    }
}

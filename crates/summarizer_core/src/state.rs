use std::sync::Arc;
use std::time::Duration;

use crate::view_model::{AppViewModel, RequestPhase, SelectionView};

pub type RequestId = u64;

/// File-picker hint only; the service decides what it accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".pdf", ".txt"];

pub const PROGRESS_SUBMITTED: u8 = 10;
pub const PROGRESS_RESPONSE_RECEIVED: u8 = 70;
pub const PROGRESS_COMPLETE: u8 = 100;
pub const DEFAULT_PROGRESS_RESET_DELAY: Duration = Duration::from_millis(1000);

pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary returned.";
pub const UPLOAD_FAILED_FALLBACK: &str = "Upload failed";

/// A user-chosen file: display name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    name: String,
    content: Arc<[u8]>,
}

impl Selection {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Arc<[u8]> {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Case-insensitive check against [`ACCEPTED_EXTENSIONS`].
    pub fn has_accepted_extension(&self) -> bool {
        let lower = self.name.to_ascii_lowercase();
        ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

/// Lifecycle of the most recent submission.
///
/// Every non-idle variant remembers which request it belongs to so that late
/// engine events for an older request can be told apart, and carries the
/// cosmetic progress value shown next to the submit button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight {
        request_id: RequestId,
        progress: u8,
        /// Error of the previous attempt, kept visible until this one finishes.
        stale_error: Option<String>,
    },
    Succeeded {
        request_id: RequestId,
        summary: String,
        progress: u8,
    },
    Failed {
        request_id: RequestId,
        message: String,
        progress: u8,
    },
}

impl RequestState {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            RequestState::Idle => None,
            RequestState::InFlight { request_id, .. }
            | RequestState::Succeeded { request_id, .. }
            | RequestState::Failed { request_id, .. } => Some(*request_id),
        }
    }

    pub fn progress(&self) -> u8 {
        match self {
            RequestState::Idle => 0,
            RequestState::InFlight { progress, .. }
            | RequestState::Succeeded { progress, .. }
            | RequestState::Failed { progress, .. } => *progress,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight { .. })
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            RequestState::Succeeded { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed { message, .. } => Some(message),
            RequestState::InFlight { stale_error, .. } => stale_error.as_deref(),
            _ => None,
        }
    }

    fn phase(&self) -> RequestPhase {
        match self {
            RequestState::Idle => RequestPhase::Idle,
            RequestState::InFlight { .. } => RequestPhase::InFlight,
            RequestState::Succeeded { .. } => RequestPhase::Succeeded,
            RequestState::Failed { .. } => RequestPhase::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    selection: Option<Selection>,
    request: RequestState,
    last_request_id: RequestId,
    progress_reset_delay: Duration,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selection: None,
            request: RequestState::Idle,
            last_request_id: 0,
            progress_reset_delay: DEFAULT_PROGRESS_RESET_DELAY,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress_reset_delay(mut self, delay: Duration) -> Self {
        self.progress_reset_delay = delay;
        self
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn progress_reset_delay(&self) -> Duration {
        self.progress_reset_delay
    }

    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && !self.request.is_in_flight()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            selection: self.selection.as_ref().map(|selection| SelectionView {
                name: selection.name().to_string(),
                bytes: selection.len() as u64,
                accepted_extension: selection.has_accepted_extension(),
            }),
            phase: self.request.phase(),
            progress: self.request.progress(),
            summary: self.request.summary().unwrap_or_default().to_string(),
            error: self.request.error().map(ToOwned::to_owned),
            can_submit: self.can_submit(),
            can_copy: self.request.summary().is_some_and(|text| !text.is_empty()),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// `None` clears the selection, as when the file picker is cancelled.
    pub(crate) fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        // A running request cannot be cancelled; only its leftover error goes.
        match &mut self.request {
            RequestState::InFlight { stale_error, .. } => *stale_error = None,
            request => *request = RequestState::Idle,
        }
        self.mark_dirty();
    }

    /// Moves to `InFlight` and hands out the id for the new request.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        let stale_error = self.request.error().map(ToOwned::to_owned);
        self.request = RequestState::InFlight {
            request_id: self.last_request_id,
            progress: PROGRESS_SUBMITTED,
            stale_error,
        };
        self.mark_dirty();
        self.last_request_id
    }

    pub(crate) fn is_current_in_flight(&self, id: RequestId) -> bool {
        matches!(self.request, RequestState::InFlight { request_id, .. } if request_id == id)
    }

    pub(crate) fn raise_progress(&mut self, id: RequestId, value: u8) {
        if let RequestState::InFlight {
            request_id,
            progress,
            ..
        } = &mut self.request
        {
            if *request_id == id && *progress < value {
                *progress = value;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn succeed(&mut self, id: RequestId, summary: String) {
        self.request = RequestState::Succeeded {
            request_id: id,
            summary,
            progress: PROGRESS_COMPLETE,
        };
        self.mark_dirty();
    }

    pub(crate) fn fail(&mut self, id: RequestId, message: String) {
        let progress = self.request.progress();
        self.request = RequestState::Failed {
            request_id: id,
            message,
            progress,
        };
        self.mark_dirty();
    }

    pub(crate) fn reset_progress(&mut self, id: RequestId) {
        match &mut self.request {
            RequestState::Succeeded {
                request_id,
                progress,
                ..
            }
            | RequestState::Failed {
                request_id,
                progress,
                ..
            } if *request_id == id && *progress != 0 => {
                *progress = 0;
                self.dirty = true;
            }
            _ => {}
        }
    }
}

//! Summarizer core: pure upload controller state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, UploadFailure};
pub use state::{
    AppState, RequestId, RequestState, Selection, ACCEPTED_EXTENSIONS, DEFAULT_PROGRESS_RESET_DELAY,
    NO_SUMMARY_PLACEHOLDER, PROGRESS_COMPLETE, PROGRESS_RESPONSE_RECEIVED, PROGRESS_SUBMITTED,
    UPLOAD_FAILED_FALLBACK,
};
pub use update::update;
pub use view_model::{AppViewModel, RequestPhase, SelectionView};

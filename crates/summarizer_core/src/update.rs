use crate::{AppState, Effect, Msg, NO_SUMMARY_PLACEHOLDER, PROGRESS_RESPONSE_RECEIVED};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(selection) => {
            state.set_selection(selection);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Invariant: at most one request in flight. The trigger is refused, never queued.
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let Some(selection) = state.selection().cloned() else {
                return (state, Vec::new());
            };
            let request_id = state.begin_request();
            vec![Effect::Upload {
                request_id,
                file_name: selection.name().to_string(),
                content: selection.content().clone(),
            }]
        }
        Msg::UploadResponded { request_id } => {
            state.raise_progress(request_id, PROGRESS_RESPONSE_RECEIVED);
            Vec::new()
        }
        Msg::UploadFinished { request_id, result } => {
            if !state.is_current_in_flight(request_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(summary) => {
                    let summary = summary
                        .filter(|text| !text.is_empty())
                        .unwrap_or_else(|| NO_SUMMARY_PLACEHOLDER.to_string());
                    state.succeed(request_id, summary);
                }
                Err(failure) => state.fail(request_id, failure.user_message()),
            }
            vec![Effect::ScheduleProgressReset {
                request_id,
                delay: state.progress_reset_delay(),
            }]
        }
        Msg::ProgressResetElapsed { request_id } => {
            state.reset_progress(request_id);
            Vec::new()
        }
        Msg::CopyClicked => match state.request().summary() {
            Some(text) if !text.is_empty() => vec![Effect::CopyToClipboard {
                text: text.to_string(),
            }],
            _ => Vec::new(),
        },
    };

    (state, effects)
}

use std::time::Duration;

use summarizer_core::{
    update, AppState, Effect, Msg, RequestPhase, Selection, UploadFailure, PROGRESS_COMPLETE,
    PROGRESS_RESPONSE_RECEIVED, PROGRESS_SUBMITTED,
};

fn in_flight() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(Some(Selection::new("a.txt", b"abc".to_vec()))),
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    state
}

#[test]
fn progress_steps_through_synthetic_values() {
    let mut state = in_flight();
    assert!(state.consume_dirty());
    assert_eq!(state.view().progress, PROGRESS_SUBMITTED);

    let (mut state, effects) = update(state, Msg::UploadResponded { request_id: 1 });
    assert!(effects.is_empty());
    assert_eq!(state.view().progress, PROGRESS_RESPONSE_RECEIVED);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(Some("ok".to_string())),
        },
    );
    assert_eq!(state.view().progress, PROGRESS_COMPLETE);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::ProgressResetElapsed { request_id: 1 });
    assert!(effects.is_empty());
    assert_eq!(state.view().progress, 0);
    assert_eq!(state.view().phase, RequestPhase::Succeeded);
    assert!(state.consume_dirty());
}

#[test]
fn failure_keeps_progress_reached_until_reset() {
    let state = in_flight();
    let (state, _) = update(state, Msg::UploadResponded { request_id: 1 });
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Err(UploadFailure::HttpStatus(503)),
        },
    );
    assert_eq!(state.view().progress, PROGRESS_RESPONSE_RECEIVED);

    let (state, _) = update(state, Msg::ProgressResetElapsed { request_id: 1 });
    assert_eq!(state.view().progress, 0);
    assert_eq!(state.view().error.as_deref(), Some("Server responded 503"));
}

#[test]
fn stale_events_for_older_requests_are_ignored() {
    let state = in_flight();
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(Some("first".to_string())),
        },
    );
    let (mut state, _) = update(state, Msg::SubmitClicked);
    assert!(state.consume_dirty());
    let before = state.clone();

    // Timer and completion from request 1 must not touch request 2.
    let (mut state, effects) = update(state, Msg::ProgressResetElapsed { request_id: 1 });
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Ok(Some("late".to_string())),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state, before);
    assert_eq!(state.view().progress, PROGRESS_SUBMITTED);
}

#[test]
fn progress_never_moves_backwards_while_in_flight() {
    let state = in_flight();
    let (state, _) = update(state, Msg::UploadResponded { request_id: 1 });
    let (mut state, _) = update(state, Msg::UploadResponded { request_id: 1 });
    assert_eq!(state.view().progress, PROGRESS_RESPONSE_RECEIVED);
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::UploadResponded { request_id: 1 });
    assert!(!state.consume_dirty());
}

#[test]
fn reset_delay_is_configurable() {
    let (state, _) = update(
        AppState::new().with_progress_reset_delay(Duration::from_millis(250)),
        Msg::FileSelected(Some(Selection::new("a.txt", b"abc".to_vec()))),
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let (_state, effects) = update(
        state,
        Msg::UploadFinished {
            request_id: 1,
            result: Err(UploadFailure::Transport { message: None }),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ScheduleProgressReset {
            request_id: 1,
            delay: Duration::from_millis(250),
        }]
    );
}

use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use anyhow::Context;
use engine_logging::{engine_debug, engine_info};
use summarizer_core::{Effect, Msg, UploadFailure};
use summarizer_engine::{
    ClipboardWriter, EngineEvent, EngineHandle, EventSink, ReqwestUploader, Stage, SystemClipboard,
    UploadError, Uploader,
};

use super::app::AppEvent;
use crate::config::AppConfig;

/// Forwards engine events into the app's event queue as core messages.
pub(crate) struct EngineMsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EngineMsgSink {
    pub(crate) fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for EngineMsgSink {
    fn emit(&self, event: EngineEvent) {
        if let Some(msg) = engine_event_to_msg(event) {
            let _ = self.tx.send(AppEvent::Core(msg));
        }
    }
}

pub(crate) fn engine_event_to_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Progress(progress) => match progress.stage {
            Stage::Sending => None,
            Stage::ResponseReceived => Some(Msg::UploadResponded {
                request_id: progress.request_id,
            }),
        },
        EngineEvent::UploadCompleted { request_id, result } => Some(Msg::UploadFinished {
            request_id,
            result: result.map_err(|err| map_failure(&err)),
        }),
        EngineEvent::ProgressResetDue { request_id } => {
            Some(Msg::ProgressResetElapsed { request_id })
        }
    }
}

fn map_failure(err: &UploadError) -> UploadFailure {
    match err {
        UploadError::HttpStatus(code) => UploadFailure::HttpStatus(*code),
        other => UploadFailure::Transport {
            message: other.message(),
        },
    }
}

pub(crate) struct EffectRunner {
    engine: EngineHandle,
    clipboard: Arc<dyn ClipboardWriter>,
    clipboard_jobs: Vec<JoinHandle<()>>,
}

impl EffectRunner {
    pub(crate) fn new(config: &AppConfig, tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let uploader = ReqwestUploader::new(&config.upload_settings())
            .context("invalid summarization endpoint")?;
        engine_info!("Uploading to {}", uploader.endpoint());
        Self::with_parts(
            Arc::new(uploader),
            Arc::new(SystemClipboard::new(config.clipboard_linger())),
            tx,
        )
    }

    pub(crate) fn with_parts(
        uploader: Arc<dyn Uploader>,
        clipboard: Arc<dyn ClipboardWriter>,
        tx: mpsc::Sender<AppEvent>,
    ) -> anyhow::Result<Self> {
        let engine = EngineHandle::spawn(uploader, Arc::new(EngineMsgSink::new(tx)))
            .context("failed to start upload engine")?;
        Ok(Self {
            engine,
            clipboard,
            clipboard_jobs: Vec::new(),
        })
    }

    pub(crate) fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Upload {
                    request_id,
                    file_name,
                    content,
                } => {
                    engine_info!(
                        "Upload request_id={} file={} bytes={}",
                        request_id,
                        file_name,
                        content.len()
                    );
                    self.engine.upload(request_id, file_name, content);
                }
                Effect::ScheduleProgressReset { request_id, delay } => {
                    self.engine.schedule_progress_reset(request_id, delay);
                }
                Effect::CopyToClipboard { text } => self.copy(text),
            }
        }
    }

    fn copy(&mut self, text: String) {
        self.clipboard_jobs.retain(|job| !job.is_finished());
        let clipboard = self.clipboard.clone();
        // Failures stop here; the user never sees them.
        self.clipboard_jobs.push(thread::spawn(move || {
            if let Err(err) = clipboard.write_text(&text) {
                engine_debug!("Clipboard write ignored: {}", err);
            }
        }));
    }

    /// Waits for pending clipboard writes so their contents outlive the process.
    pub(crate) fn finish(self) {
        for job in self.clipboard_jobs {
            let _ = job.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use summarizer_engine::UploadProgress;

    use super::*;

    #[test]
    fn response_progress_maps_to_responded() {
        assert_eq!(
            engine_event_to_msg(EngineEvent::Progress(UploadProgress {
                request_id: 3,
                stage: Stage::ResponseReceived,
            })),
            Some(Msg::UploadResponded { request_id: 3 })
        );
        assert_eq!(
            engine_event_to_msg(EngineEvent::Progress(UploadProgress {
                request_id: 3,
                stage: Stage::Sending,
            })),
            None
        );
    }

    #[test]
    fn upload_errors_map_to_failures() {
        assert_eq!(
            engine_event_to_msg(EngineEvent::UploadCompleted {
                request_id: 1,
                result: Err(UploadError::HttpStatus(404)),
            }),
            Some(Msg::UploadFinished {
                request_id: 1,
                result: Err(UploadFailure::HttpStatus(404)),
            })
        );
        assert_eq!(
            engine_event_to_msg(EngineEvent::UploadCompleted {
                request_id: 2,
                result: Err(UploadError::Network("connection refused".to_string())),
            }),
            Some(Msg::UploadFinished {
                request_id: 2,
                result: Err(UploadFailure::Transport {
                    message: Some("connection refused".to_string()),
                }),
            })
        );
        assert_eq!(
            engine_event_to_msg(EngineEvent::UploadCompleted {
                request_id: 3,
                result: Err(UploadError::Network(String::new())),
            }),
            Some(Msg::UploadFinished {
                request_id: 3,
                result: Err(UploadFailure::Transport { message: None }),
            })
        );
    }

    #[test]
    fn reset_due_maps_to_elapsed() {
        assert_eq!(
            engine_event_to_msg(EngineEvent::ProgressResetDue { request_id: 8 }),
            Some(Msg::ProgressResetElapsed { request_id: 8 })
        );
    }
}

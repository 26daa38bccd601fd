use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;

use crate::upload::{EventSink, Uploader};
use crate::{EngineEvent, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(std::io::Error),
}

enum EngineCommand {
    Upload {
        request_id: RequestId,
        file_name: String,
        content: Arc<[u8]>,
    },
    ScheduleProgressReset {
        request_id: RequestId,
        delay: Duration,
    },
}

/// Front door to the engine thread.
///
/// Commands are fire-and-forget; results arrive through the [`EventSink`].
/// Dropping the handle stops the thread and abandons unfinished work.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        uploader: Arc<dyn Uploader>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("summarizer-engine-rt")
            .build()?;

        thread::Builder::new()
            .name("summarizer-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let uploader = uploader.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(uploader.as_ref(), sink.as_ref(), command).await;
                    });
                }
                engine_debug!("engine command channel closed; shutting down");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx })
    }

    pub fn upload(&self, request_id: RequestId, file_name: impl Into<String>, content: Arc<[u8]>) {
        self.send(EngineCommand::Upload {
            request_id,
            file_name: file_name.into(),
            content,
        });
    }

    pub fn schedule_progress_reset(&self, request_id: RequestId, delay: Duration) {
        self.send(EngineCommand::ScheduleProgressReset { request_id, delay });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(uploader: &dyn Uploader, sink: &dyn EventSink, command: EngineCommand) {
    match command {
        EngineCommand::Upload {
            request_id,
            file_name,
            content,
        } => {
            let result = uploader.upload(request_id, &file_name, content, sink).await;
            if let Err(err) = &result {
                engine_warn!("request_id={} upload failed: {}", request_id, err);
            }
            sink.emit(EngineEvent::UploadCompleted { request_id, result });
        }
        EngineCommand::ScheduleProgressReset { request_id, delay } => {
            tokio::time::sleep(delay).await;
            sink.emit(EngineEvent::ProgressResetDue { request_id });
        }
    }
}

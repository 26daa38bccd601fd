use crate::UploadError;

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Sending,
    ResponseReceived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    pub request_id: RequestId,
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(UploadProgress),
    /// `Ok(None)`: 2xx with no usable `summary` field.
    UploadCompleted {
        request_id: RequestId,
        result: Result<Option<String>, UploadError>,
    },
    ProgressResetDue {
        request_id: RequestId,
    },
}

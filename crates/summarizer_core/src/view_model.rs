#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub name: String,
    pub bytes: u64,
    pub accepted_extension: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub selection: Option<SelectionView>,
    pub phase: RequestPhase,
    /// Cosmetic 0-100 indicator; 0 means "hide the bar".
    pub progress: u8,
    /// Empty unless the last request succeeded.
    pub summary: String,
    pub error: Option<String>,
    pub can_submit: bool,
    pub can_copy: bool,
    pub dirty: bool,
}

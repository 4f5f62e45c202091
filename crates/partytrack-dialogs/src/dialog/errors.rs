use crate::errors::PartytrackError;

/// Failures of the dialog service.
///
/// Every variant is a wiring defect (missing registration, unmapped type,
/// malformed request), so callers surface them instead of retrying.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("No window type registered for view-model '{view_model}'")]
    MappingNotFound { view_model: &'static str },

    #[error(
        "View-model '{view_model}' is mapped twice ('{existing}' and '{replacement}')"
    )]
    DuplicateMapping {
        view_model: &'static str,
        existing: &'static str,
        replacement: &'static str,
    },

    #[error("View-model '{view_model}' must be bound to exactly one registered view, found {matches}")]
    ViewModelNotBound {
        view_model: &'static str,
        matches: usize,
    },

    #[error("View '{view}' is not contained within a window")]
    OrphanedView { view: String },

    #[error("Dialog type '{window_type}' is not backed by a window surface")]
    NotAWindow { window_type: &'static str },

    #[error("Invalid file filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },
}

impl PartytrackError for DialogError {
    fn error_code(&self) -> &'static str {
        match self {
            DialogError::MappingNotFound { .. } => "DIALOG_MAPPING_NOT_FOUND",
            DialogError::DuplicateMapping { .. } => "DIALOG_DUPLICATE_MAPPING",
            DialogError::ViewModelNotBound { .. } => "DIALOG_VIEW_MODEL_NOT_BOUND",
            DialogError::OrphanedView { .. } => "DIALOG_ORPHANED_VIEW",
            DialogError::NotAWindow { .. } => "DIALOG_NOT_A_WINDOW",
            DialogError::InvalidFilter { .. } => "DIALOG_INVALID_FILTER",
        }
    }
}

//! partytrack-dialogs: dialog service for view-models
//!
//! View-models ask for dialogs by naming themselves and a payload
//! view-model. The service finds the window hosting the caller through a
//! registry of live views and shows the dialog modally over it.
//!
//! # Main Entry Points
//!
//! - [`views`] - View tree, view registry and owner-window resolution
//! - [`mapping`] - View-model type to window type table
//! - [`dialog`] - The dialog service and message boxes
//! - [`pickers`] - File and folder picker requests and backends
//! - [`shell`] - Composition root that opens the main window

pub mod dialog;
pub mod errors;
pub mod logging;
pub mod mapping;
pub mod pickers;
pub mod shell;
pub mod view_model;
pub mod views;

pub use dialog::{
    DialogController, DialogError, DialogResult, DialogWindow, MessageBoxButtons, MessageBoxIcon,
    MessageBoxResult,
};
pub use errors::PartytrackError;
pub use logging::init_logging;
pub use mapping::{ViewModelTypeMap, WindowType};
pub use pickers::{FileFilter, FolderBrowserRequest, NativeDialogs, OpenFileRequest, SaveFileRequest};
#[cfg(feature = "native")]
pub use pickers::{NativeWindowHandle, RfdDialogs};
pub use shell::AppShell;
pub use view_model::{ViewModelRef, ViewModelType};
pub use views::{DialogResolver, ViewHandle, ViewRegistry};

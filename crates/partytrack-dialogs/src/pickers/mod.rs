#[cfg(feature = "native")]
pub mod native;
pub mod traits;
pub mod types;

// Re-export public API
#[cfg(feature = "native")]
pub use native::{NativeWindowHandle, RfdDialogs};
pub use traits::NativeDialogs;
pub use types::{
    FileDialogRequest, FileFilter, FolderBrowserRequest, OpenFileRequest, SaveFileRequest,
};

use std::path::PathBuf;

use crate::dialog::message_box::{MessageBoxRequest, MessageBoxResult};
use crate::views::ViewHandle;

use super::types::{FileFilter, FolderBrowserRequest, OpenFileRequest, SaveFileRequest};

/// Boundary to the platform's message box and file/folder pickers.
///
/// Every call blocks until the user dismisses the dialog. `owner` is the
/// window the dialog is modal to. Implementations only present the request;
/// writing the selection back is the controller's job.
pub trait NativeDialogs {
    fn message_box(&self, owner: &ViewHandle, request: &MessageBoxRequest) -> MessageBoxResult;

    /// Returns the selected files, or `None` on cancel.
    fn open_file(
        &self,
        owner: &ViewHandle,
        request: &OpenFileRequest,
        filters: &[FileFilter],
    ) -> Option<Vec<PathBuf>>;

    /// Returns the chosen target file, or `None` on cancel.
    fn save_file(
        &self,
        owner: &ViewHandle,
        request: &SaveFileRequest,
        filters: &[FileFilter],
    ) -> Option<PathBuf>;

    /// Returns the chosen folder, or `None` on cancel.
    fn browse_folder(&self, owner: &ViewHandle, request: &FolderBrowserRequest)
    -> Option<PathBuf>;
}

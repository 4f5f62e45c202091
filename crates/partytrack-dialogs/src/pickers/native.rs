//! `rfd`-backed implementation of [`NativeDialogs`].

use std::path::PathBuf;

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, RawDisplayHandle,
    RawWindowHandle, WindowHandle,
};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::debug;

use crate::dialog::message_box::{
    MessageBoxButtons, MessageBoxIcon, MessageBoxRequest, MessageBoxResult,
};
use crate::views::ViewHandle;

use super::traits::NativeDialogs;
use super::types::{FileFilter, FolderBrowserRequest, OpenFileRequest, SaveFileRequest};

/// Platform handles of the real window behind a [`ViewHandle`].
///
/// Set by the UI host with [`ViewHandle::set_native_handle`] so pickers can
/// be parented to the right window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeWindowHandle {
    pub window: RawWindowHandle,
    pub display: RawDisplayHandle,
}

impl HasWindowHandle for NativeWindowHandle {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        // SAFETY: the host only stores handles of windows that are alive
        // while the view is shown, and pickers run while the owner is shown.
        Ok(unsafe { WindowHandle::borrow_raw(self.window) })
    }
}

impl HasDisplayHandle for NativeWindowHandle {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        // SAFETY: see `window_handle`.
        Ok(unsafe { DisplayHandle::borrow_raw(self.display) })
    }
}

/// Native dialogs through `rfd`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfdDialogs;

impl RfdDialogs {
    pub fn new() -> Self {
        Self
    }
}

fn file_dialog(owner: &ViewHandle, title: Option<&str>, directory: Option<&PathBuf>) -> FileDialog {
    let mut dialog = FileDialog::new();
    if let Some(title) = title {
        dialog = dialog.set_title(title);
    }
    if let Some(directory) = directory {
        dialog = dialog.set_directory(directory);
    }
    if let Some(parent) = owner.native_handle() {
        dialog = dialog.set_parent(&parent);
    } else {
        debug!(event = "dialogs.native.unparented", owner = %owner.id());
    }
    dialog
}

fn with_filters(mut dialog: FileDialog, filters: &[FileFilter]) -> FileDialog {
    for filter in filters {
        dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
    }
    dialog
}

impl NativeDialogs for RfdDialogs {
    fn message_box(&self, owner: &ViewHandle, request: &MessageBoxRequest) -> MessageBoxResult {
        let level = match request.icon {
            MessageBoxIcon::Warning => MessageLevel::Warning,
            MessageBoxIcon::Error => MessageLevel::Error,
            MessageBoxIcon::None | MessageBoxIcon::Information | MessageBoxIcon::Question => {
                MessageLevel::Info
            }
        };
        let buttons = match request.buttons {
            MessageBoxButtons::Ok => MessageButtons::Ok,
            MessageBoxButtons::OkCancel => MessageButtons::OkCancel,
            MessageBoxButtons::YesNo => MessageButtons::YesNo,
            MessageBoxButtons::YesNoCancel => MessageButtons::YesNoCancel,
        };

        let mut dialog = MessageDialog::new()
            .set_title(request.caption.as_str())
            .set_description(request.text.as_str())
            .set_level(level)
            .set_buttons(buttons);
        if let Some(parent) = owner.native_handle() {
            dialog = dialog.set_parent(&parent);
        }

        match dialog.show() {
            MessageDialogResult::Ok => MessageBoxResult::Ok,
            MessageDialogResult::Cancel => MessageBoxResult::Cancel,
            MessageDialogResult::Yes => MessageBoxResult::Yes,
            MessageDialogResult::No => MessageBoxResult::No,
            MessageDialogResult::Custom(_) => MessageBoxResult::None,
        }
    }

    fn open_file(
        &self,
        owner: &ViewHandle,
        request: &OpenFileRequest,
        filters: &[FileFilter],
    ) -> Option<Vec<PathBuf>> {
        let mut dialog = file_dialog(
            owner,
            request.file.title.as_deref(),
            request.file.initial_directory.as_ref(),
        );
        dialog = with_filters(dialog, filters);
        if let Some(name) = request.file.initial_file_name() {
            dialog = dialog.set_file_name(name);
        }

        if request.multiselect {
            dialog.pick_files()
        } else {
            dialog.pick_file().map(|path| vec![path])
        }
    }

    fn save_file(
        &self,
        owner: &ViewHandle,
        request: &SaveFileRequest,
        filters: &[FileFilter],
    ) -> Option<PathBuf> {
        let mut dialog = file_dialog(
            owner,
            request.file.title.as_deref(),
            request.file.initial_directory.as_ref(),
        );
        dialog = with_filters(dialog, filters);
        if let Some(name) = request.file.initial_file_name() {
            dialog = dialog.set_file_name(name);
        }
        dialog.save_file()
    }

    fn browse_folder(
        &self,
        owner: &ViewHandle,
        request: &FolderBrowserRequest,
    ) -> Option<PathBuf> {
        let start = request
            .selected_path
            .as_ref()
            .or(request.root_directory.as_ref());
        file_dialog(owner, request.description.as_deref(), start)
            .set_can_create_directories(request.show_new_folder_button)
            .pick_folder()
    }
}

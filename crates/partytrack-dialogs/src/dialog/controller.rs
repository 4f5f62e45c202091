use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use partytrack_config::DialogsConfig;
use tracing::{debug, info, warn};

use crate::mapping::{ViewModelTypeMap, WindowType};
use crate::pickers::{FolderBrowserRequest, NativeDialogs, OpenFileRequest, SaveFileRequest};
use crate::view_model::ViewModelRef;
use crate::views::{DialogResolver, ViewHandle, ViewRegistry};

use super::errors::DialogError;
use super::message_box::{MessageBoxButtons, MessageBoxIcon, MessageBoxRequest, MessageBoxResult};
use super::traits::DialogWindow;
use super::types::DialogResult;

/// The dialog service used by view-models.
///
/// View-models name themselves (the owner) and a payload view-model; the
/// controller picks the window, finds the owner window through the registry
/// and blocks until the user is done.
pub struct DialogController {
    type_map: Rc<ViewModelTypeMap>,
    resolver: DialogResolver,
    native: Box<dyn NativeDialogs>,
    settings: DialogsConfig,
    last_directory: RefCell<Option<PathBuf>>,
}

impl DialogController {
    pub fn new(
        type_map: Rc<ViewModelTypeMap>,
        registry: Rc<ViewRegistry>,
        native: Box<dyn NativeDialogs>,
        settings: DialogsConfig,
    ) -> Self {
        Self {
            type_map,
            resolver: DialogResolver::new(registry),
            native,
            settings,
            last_directory: RefCell::new(None),
        }
    }

    pub fn registry(&self) -> &Rc<ViewRegistry> {
        self.resolver.registry()
    }

    pub fn resolver(&self) -> &DialogResolver {
        &self.resolver
    }

    pub fn type_map(&self) -> &ViewModelTypeMap {
        &self.type_map
    }

    /// Show `payload` in the window type mapped to its view-model type.
    pub fn show_dialog(
        &self,
        owner: &ViewModelRef,
        payload: &ViewModelRef,
    ) -> Result<DialogResult, DialogError> {
        let window_type = self.type_map.resolve(payload.view_model_type())?;
        self.show_dialog_with(owner, payload, window_type)
    }

    /// Show `payload` in a window of type `W`, bypassing the type map.
    pub fn show_dialog_as<W: DialogWindow + Default + 'static>(
        &self,
        owner: &ViewModelRef,
        payload: &ViewModelRef,
    ) -> Result<DialogResult, DialogError> {
        self.show_dialog_with(owner, payload, WindowType::of::<W>())
    }

    /// Show `payload` modally in a new window of `window_type`, owned by the
    /// window hosting `owner`.
    pub fn show_dialog_with(
        &self,
        owner: &ViewModelRef,
        payload: &ViewModelRef,
        window_type: WindowType,
    ) -> Result<DialogResult, DialogError> {
        let owner_window = self.resolver.find_owner_window(owner)?;

        let mut dialog = window_type.instantiate();
        let surface = dialog.surface().clone();
        if !surface.is_window() {
            return Err(DialogError::NotAWindow {
                window_type: window_type.name(),
            });
        }

        surface.set_owner(&owner_window);
        surface.set_data_context(payload.clone());
        if dialog.can_open_windows() {
            self.registry().set_can_open_windows(&surface, true);
        }

        info!(
            event = "dialogs.controller.show_dialog_started",
            window_type = window_type.name(),
            view_model = %payload.view_model_type(),
            owner = %owner_window.id()
        );

        let result = dialog.show_modal();

        // Closing raises the closed notification, which drops the dialog
        // from the registry.
        surface.close();
        surface.clear_data_context();

        info!(
            event = "dialogs.controller.show_dialog_completed",
            window_type = window_type.name(),
            result = %result,
            accepted = result.is_accepted()
        );

        Ok(result)
    }

    pub fn show_message_box(
        &self,
        owner: &ViewModelRef,
        text: &str,
        caption: &str,
        buttons: MessageBoxButtons,
        icon: MessageBoxIcon,
    ) -> Result<MessageBoxResult, DialogError> {
        let owner_window = self.resolver.find_owner_window(owner)?;
        let request = MessageBoxRequest {
            text: text.to_string(),
            caption: caption.to_string(),
            buttons,
            icon,
        };

        let result = match self.native.message_box(&owner_window, &request) {
            result if result == MessageBoxResult::None || buttons.results().contains(&result) => {
                result
            }
            unexpected => {
                warn!(
                    event = "dialogs.controller.message_box_unexpected_result",
                    buttons = ?buttons,
                    result = %unexpected
                );
                MessageBoxResult::None
            }
        };

        info!(
            event = "dialogs.controller.message_box_completed",
            owner = %owner_window.id(),
            buttons = ?buttons,
            result = %result
        );

        Ok(result)
    }

    /// Show the open-file picker for `request`.
    ///
    /// Returns `true` and stores the selection in `request` if the user
    /// accepts; returns `false` and leaves `request` untouched on cancel.
    pub fn show_open_file_dialog(
        &self,
        owner: &ViewModelRef,
        request: &mut OpenFileRequest,
    ) -> Result<bool, DialogError> {
        let owner_window = self.resolver.find_owner_window(owner)?;
        let filters = request.file.filters()?;

        let mut effective = request.clone();
        effective.file.initial_directory =
            self.initial_directory(request.file.initial_directory.as_deref());

        let selection = self
            .native
            .open_file(&owner_window, &effective, &filters)
            .filter(|paths| !paths.is_empty());

        let Some(paths) = selection else {
            debug!(event = "dialogs.controller.open_file_cancelled", owner = %owner_window.id());
            return Ok(false);
        };

        if let Some(rejected) = request.file.rejected_path(&paths) {
            warn!(
                event = "dialogs.controller.open_file_rejected",
                owner = %owner_window.id(),
                path = %rejected.display()
            );
            return Ok(false);
        }

        self.remember_directory(paths[0].parent());
        info!(
            event = "dialogs.controller.open_file_accepted",
            owner = %owner_window.id(),
            files = paths.len()
        );
        request.file.accept(paths);
        Ok(true)
    }

    /// Show the save-file picker for `request`.
    ///
    /// On acceptance the chosen path, with the default extension applied, is
    /// stored in `request`.
    pub fn show_save_file_dialog(
        &self,
        owner: &ViewModelRef,
        request: &mut SaveFileRequest,
    ) -> Result<bool, DialogError> {
        let owner_window = self.resolver.find_owner_window(owner)?;
        let filters = request.file.filters()?;

        let mut effective = request.clone();
        effective.file.initial_directory =
            self.initial_directory(request.file.initial_directory.as_deref());

        let Some(path) = self.native.save_file(&owner_window, &effective, &filters) else {
            debug!(event = "dialogs.controller.save_file_cancelled", owner = %owner_window.id());
            return Ok(false);
        };

        let path = request.file.with_default_extension(path);
        if let Some(rejected) = request.file.rejected_path(std::slice::from_ref(&path)) {
            warn!(
                event = "dialogs.controller.save_file_rejected",
                owner = %owner_window.id(),
                path = %rejected.display()
            );
            return Ok(false);
        }
        if request.overwrite_prompt
            && path.exists()
            && !self.confirm_overwrite(&owner_window, request, &path)
        {
            debug!(event = "dialogs.controller.overwrite_declined", path = %path.display());
            return Ok(false);
        }

        self.remember_directory(path.parent());
        info!(
            event = "dialogs.controller.save_file_accepted",
            owner = %owner_window.id(),
            path = %path.display()
        );
        request.file.accept(vec![path]);
        Ok(true)
    }

    /// Show the folder picker for `request`; the chosen folder is stored in
    /// `request.selected_path`.
    pub fn show_folder_browser_dialog(
        &self,
        owner: &ViewModelRef,
        request: &mut FolderBrowserRequest,
    ) -> Result<bool, DialogError> {
        let owner_window = self.resolver.find_owner_window(owner)?;

        let mut effective = request.clone();
        effective.root_directory = self.initial_directory(request.root_directory.as_deref());

        let Some(folder) = self.native.browse_folder(&owner_window, &effective) else {
            debug!(event = "dialogs.controller.folder_cancelled", owner = %owner_window.id());
            return Ok(false);
        };

        self.remember_directory(Some(&folder));
        info!(
            event = "dialogs.controller.folder_accepted",
            owner = %owner_window.id(),
            path = %folder.display()
        );
        request.selected_path = Some(folder);
        Ok(true)
    }

    fn confirm_overwrite(&self, owner: &ViewHandle, request: &SaveFileRequest, path: &Path) -> bool {
        let confirm = MessageBoxRequest {
            text: format!("{} already exists.\nDo you want to replace it?", path.display()),
            caption: request
                .file
                .title
                .clone()
                .unwrap_or_else(|| "Confirm Save As".to_string()),
            buttons: MessageBoxButtons::YesNo,
            icon: MessageBoxIcon::Warning,
        };
        self.native.message_box(owner, &confirm) == MessageBoxResult::Yes
    }

    /// Request value, then last accepted directory, then configured default.
    fn initial_directory(&self, requested: Option<&Path>) -> Option<PathBuf> {
        if let Some(dir) = requested {
            return Some(dir.to_path_buf());
        }
        if self.settings.remember_last_directory()
            && let Some(last) = self.last_directory.borrow().clone()
        {
            return Some(last);
        }
        self.settings.default_directory().map(Path::to_path_buf)
    }

    fn remember_directory(&self, dir: Option<&Path>) {
        if !self.settings.remember_last_directory() {
            return;
        }
        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            self.last_directory.replace(Some(dir.to_path_buf()));
        }
    }
}

impl std::fmt::Debug for DialogController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogController")
            .field("type_map", &self.type_map)
            .field("registry", self.resolver.registry())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

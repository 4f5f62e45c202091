use std::rc::Rc;

use partytrack_config::DialogsConfig;
use tracing::info;

use crate::dialog::DialogController;
use crate::mapping::ViewModelTypeMap;
use crate::pickers::NativeDialogs;
use crate::view_model::ViewModelRef;
use crate::views::{ViewHandle, ViewRegistry};

/// Application composition root.
///
/// Owns the registry and the dialog service, and opens the main window.
/// The main window is never looked up through the type map; everything
/// shown afterwards goes through [`DialogController`].
pub struct AppShell {
    registry: Rc<ViewRegistry>,
    controller: Rc<DialogController>,
    main_window: Option<ViewHandle>,
}

impl AppShell {
    pub fn new(
        type_map: ViewModelTypeMap,
        native: Box<dyn NativeDialogs>,
        settings: DialogsConfig,
    ) -> Self {
        let registry = ViewRegistry::new();
        let controller = Rc::new(DialogController::new(
            Rc::new(type_map),
            Rc::clone(&registry),
            native,
            settings,
        ));

        info!(event = "dialogs.shell.created");

        Self {
            registry,
            controller,
            main_window: None,
        }
    }

    /// Bind `main_view_model` to `surface` and register it, so the main
    /// view-model can own dialogs.
    ///
    /// Opening a second main window replaces the first; the first is closed.
    pub fn open_main_window(&mut self, surface: ViewHandle, main_view_model: ViewModelRef) {
        if let Some(previous) = self.main_window.take()
            && !previous.ptr_eq(&surface)
        {
            previous.close();
        }

        surface.set_data_context(main_view_model);
        self.registry.set_can_open_windows(&surface, true);

        info!(
            event = "dialogs.shell.main_window_opened",
            window = %surface.id(),
            name = surface.name()
        );

        self.main_window = Some(surface);
    }

    pub fn main_window(&self) -> Option<&ViewHandle> {
        self.main_window.as_ref()
    }

    pub fn registry(&self) -> &Rc<ViewRegistry> {
        &self.registry
    }

    /// Shared dialog service; view-models keep a clone of this.
    pub fn controller(&self) -> Rc<DialogController> {
        Rc::clone(&self.controller)
    }
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("registry", &self.registry)
            .field("main_window", &self.main_window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::dialog::{MessageBoxButtons, MessageBoxIcon, MessageBoxRequest, MessageBoxResult};
    use crate::pickers::{FileFilter, FolderBrowserRequest, OpenFileRequest, SaveFileRequest};

    struct MainViewModel;

    struct AlwaysOk;

    impl NativeDialogs for AlwaysOk {
        fn message_box(&self, _owner: &ViewHandle, _request: &MessageBoxRequest) -> MessageBoxResult {
            MessageBoxResult::Ok
        }

        fn open_file(
            &self,
            _owner: &ViewHandle,
            _request: &OpenFileRequest,
            _filters: &[FileFilter],
        ) -> Option<Vec<PathBuf>> {
            None
        }

        fn save_file(
            &self,
            _owner: &ViewHandle,
            _request: &SaveFileRequest,
            _filters: &[FileFilter],
        ) -> Option<PathBuf> {
            None
        }

        fn browse_folder(&self, _owner: &ViewHandle, _request: &FolderBrowserRequest) -> Option<PathBuf> {
            None
        }
    }

    fn shell() -> AppShell {
        let type_map = ViewModelTypeMap::builder().build().unwrap();
        AppShell::new(type_map, Box::new(AlwaysOk), DialogsConfig::default())
    }

    #[test]
    fn test_main_view_model_can_show_message_box() {
        let mut shell = shell();
        let main_vm = ViewModelRef::new(Rc::new(MainViewModel));
        shell.open_main_window(ViewHandle::window("main"), main_vm.clone());

        let result = shell
            .controller()
            .show_message_box(&main_vm, "Hello", "Party", MessageBoxButtons::Ok, MessageBoxIcon::Information)
            .unwrap();

        assert_eq!(result, MessageBoxResult::Ok);
        assert_eq!(shell.registry().len(), 1);
    }

    #[test]
    fn test_main_view_model_is_not_in_type_map() {
        let mut shell = shell();
        let main_vm = ViewModelRef::new(Rc::new(MainViewModel));
        shell.open_main_window(ViewHandle::window("main"), main_vm.clone());

        assert!(!shell.controller().type_map().contains(main_vm.view_model_type()));
    }

    #[test]
    fn test_reopening_main_window_closes_previous() {
        let mut shell = shell();
        let first = ViewHandle::window("main");
        shell.open_main_window(first.clone(), ViewModelRef::new(Rc::new(MainViewModel)));

        let second = ViewHandle::window("main");
        shell.open_main_window(second.clone(), ViewModelRef::new(Rc::new(MainViewModel)));

        assert!(first.is_closed());
        assert!(!shell.registry().is_registered(&first));
        assert!(shell.registry().is_registered(&second));
        assert!(shell.main_window().unwrap().ptr_eq(&second));
    }
}

use crate::views::ViewHandle;

use super::types::DialogResult;

/// A window that can be shown modally as a dialog.
///
/// Implemented by every concrete dialog window. The controller creates the
/// window through its [`WindowType`](crate::mapping::WindowType), binds the
/// payload view-model to [`surface`](DialogWindow::surface), then calls
/// [`show_modal`](DialogWindow::show_modal).
pub trait DialogWindow {
    /// The window surface backing this dialog. Must be a `ViewKind::Window`.
    fn surface(&self) -> &ViewHandle;

    /// Run the dialog until the user dismisses it.
    ///
    /// The bound view-model is available through `surface().data_context()`.
    fn show_modal(&mut self) -> DialogResult;

    /// Whether the dialog registers itself as a view while shown, so that its
    /// own view-model can open nested dialogs.
    fn can_open_windows(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockWindow {
        surface: ViewHandle,
    }

    impl DialogWindow for MockWindow {
        fn surface(&self) -> &ViewHandle {
            &self.surface
        }

        fn show_modal(&mut self) -> DialogResult {
            DialogResult::Accepted
        }
    }

    #[test]
    fn test_dialog_window_defaults() {
        let mut window = MockWindow {
            surface: ViewHandle::window("mock"),
        };
        assert!(window.can_open_windows());
        assert!(window.surface().is_window());
        assert_eq!(window.show_modal(), DialogResult::Accepted);
    }
}

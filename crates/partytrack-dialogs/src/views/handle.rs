use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::view_model::ViewModelRef;

#[cfg(feature = "native")]
use crate::pickers::native::NativeWindowHandle;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a view, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

/// Token returned by `on_attached`/`on_closed`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Top-level surface: owns dialogs and raises the closed notification.
    Window,
    /// Embedded surface hosted inside a window through its parent chain.
    Control,
}

type Handler = Rc<dyn Fn(&ViewHandle)>;

struct ViewNode {
    id: ViewId,
    name: String,
    kind: ViewKind,
    data_context: RefCell<Option<ViewModelRef>>,
    parent: RefCell<Weak<ViewNode>>,
    children: RefCell<Vec<Weak<ViewNode>>>,
    owner: RefCell<Weak<ViewNode>>,
    can_open_windows: Cell<bool>,
    closed: Cell<bool>,
    attached_handlers: RefCell<Vec<(Subscription, Handler)>>,
    closed_handlers: RefCell<Vec<(Subscription, Handler)>>,
    #[cfg(feature = "native")]
    native: Cell<Option<NativeWindowHandle>>,
}

/// Reference to a live UI surface.
///
/// Cloning is cheap and yields the same surface; equality is identity.
/// Parent and owner links are weak, so a handle never keeps its window alive.
#[derive(Clone)]
pub struct ViewHandle(Rc<ViewNode>);

impl ViewHandle {
    pub fn window(name: impl Into<String>) -> Self {
        Self::new(name.into(), ViewKind::Window)
    }

    pub fn control(name: impl Into<String>) -> Self {
        Self::new(name.into(), ViewKind::Control)
    }

    fn new(name: String, kind: ViewKind) -> Self {
        Self(Rc::new(ViewNode {
            id: ViewId::next(),
            name,
            kind,
            data_context: RefCell::new(None),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            owner: RefCell::new(Weak::new()),
            can_open_windows: Cell::new(false),
            closed: Cell::new(false),
            attached_handlers: RefCell::new(Vec::new()),
            closed_handlers: RefCell::new(Vec::new()),
            #[cfg(feature = "native")]
            native: Cell::new(None),
        }))
    }

    pub fn id(&self) -> ViewId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> ViewKind {
        self.0.kind
    }

    pub fn is_window(&self) -> bool {
        self.0.kind == ViewKind::Window
    }

    pub fn ptr_eq(&self, other: &ViewHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // --- Data binding ---

    pub fn data_context(&self) -> Option<ViewModelRef> {
        self.0.data_context.borrow().clone()
    }

    pub fn set_data_context(&self, view_model: ViewModelRef) {
        self.0.data_context.replace(Some(view_model));
    }

    pub fn clear_data_context(&self) {
        self.0.data_context.replace(None);
    }

    /// True when this view's data context is `view_model` (reference identity).
    pub fn is_bound_to(&self, view_model: &ViewModelRef) -> bool {
        self.0
            .data_context
            .borrow()
            .as_ref()
            .is_some_and(|dc| dc.same_instance(view_model))
    }

    // --- Containment hierarchy ---

    pub fn parent(&self) -> Option<ViewHandle> {
        self.0.parent.borrow().upgrade().map(ViewHandle)
    }

    /// Place this view inside `parent`.
    ///
    /// Raises the attached notification on this view and its descendants when
    /// the move makes their owning window resolvable. Windows are top-level
    /// and cannot be attached; attaching under a descendant is rejected.
    pub fn attach_to(&self, parent: &ViewHandle) {
        if self.is_window() {
            warn!(
                event = "dialogs.view.attach_rejected",
                view = %self.id(),
                reason = "window_is_top_level"
            );
            return;
        }

        if parent.ancestors_and_self().any(|v| v.ptr_eq(self)) {
            warn!(
                event = "dialogs.view.attach_rejected",
                view = %self.id(),
                parent = %parent.id(),
                reason = "cycle"
            );
            return;
        }

        self.detach();
        self.0.parent.replace(Rc::downgrade(&parent.0));
        {
            let mut children = parent.0.children.borrow_mut();
            children.retain(|c| c.strong_count() > 0);
            children.push(Rc::downgrade(&self.0));
        }

        debug!(
            event = "dialogs.view.attached",
            view = %self.id(),
            parent = %parent.id()
        );

        if self.owning_window().is_some() {
            self.raise_attached();
        }
    }

    /// Remove this view from its parent, if any.
    pub fn detach(&self) {
        let old = self.0.parent.replace(Weak::new());
        if let Some(old_parent) = old.upgrade() {
            let this = Rc::as_ptr(&self.0);
            old_parent
                .children
                .borrow_mut()
                .retain(|c| c.strong_count() > 0 && !std::ptr::eq(c.as_ptr(), this));
        }
    }

    fn ancestors_and_self(&self) -> impl Iterator<Item = ViewHandle> {
        std::iter::successors(Some(self.clone()), |v| v.parent())
    }

    /// The window hosting this view: the view itself if it is a window,
    /// otherwise the nearest window ancestor.
    pub fn owning_window(&self) -> Option<ViewHandle> {
        self.ancestors_and_self().find(|v| v.is_window())
    }

    // --- Window-only state ---

    /// Modal owner of this window, set when it is shown as a dialog.
    pub fn owner(&self) -> Option<ViewHandle> {
        self.0.owner.borrow().upgrade().map(ViewHandle)
    }

    pub fn set_owner(&self, owner: &ViewHandle) {
        self.0.owner.replace(Rc::downgrade(&owner.0));
    }

    pub fn is_closed(&self) -> bool {
        self.0.closed.get()
    }

    /// Close a window and raise its closed notification once.
    ///
    /// Closing a control or an already closed window does nothing.
    pub fn close(&self) {
        if !self.is_window() {
            debug!(event = "dialogs.view.close_ignored", view = %self.id());
            return;
        }
        if self.0.closed.replace(true) {
            return;
        }

        debug!(event = "dialogs.view.closed", view = %self.id(), name = self.name());

        for handler in snapshot(&self.0.closed_handlers) {
            handler(self);
        }
    }

    pub fn can_open_windows(&self) -> bool {
        self.0.can_open_windows.get()
    }

    pub(crate) fn set_can_open_windows_flag(&self, value: bool) {
        self.0.can_open_windows.set(value);
    }

    #[cfg(feature = "native")]
    pub fn native_handle(&self) -> Option<NativeWindowHandle> {
        self.0.native.get()
    }

    /// Attach the platform handles of the real window backing this view.
    #[cfg(feature = "native")]
    pub fn set_native_handle(&self, handle: NativeWindowHandle) {
        self.0.native.set(Some(handle));
    }

    // --- Lifecycle notifications ---

    pub fn on_attached(&self, handler: impl Fn(&ViewHandle) + 'static) -> Subscription {
        let subscription = Subscription::next();
        self.0
            .attached_handlers
            .borrow_mut()
            .push((subscription, Rc::new(handler)));
        subscription
    }

    /// Returns true if the subscription was present.
    pub fn remove_attached(&self, subscription: Subscription) -> bool {
        remove_handler(&self.0.attached_handlers, subscription)
    }

    pub fn on_closed(&self, handler: impl Fn(&ViewHandle) + 'static) -> Subscription {
        let subscription = Subscription::next();
        self.0
            .closed_handlers
            .borrow_mut()
            .push((subscription, Rc::new(handler)));
        subscription
    }

    pub fn remove_closed(&self, subscription: Subscription) -> bool {
        remove_handler(&self.0.closed_handlers, subscription)
    }

    fn raise_attached(&self) {
        for handler in snapshot(&self.0.attached_handlers) {
            handler(self);
        }

        let children: Vec<ViewHandle> = self
            .0
            .children
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .map(ViewHandle)
            .collect();
        for child in children {
            child.raise_attached();
        }
    }
}

// Handlers may subscribe or unsubscribe while running, so iterate a copy.
fn snapshot(handlers: &RefCell<Vec<(Subscription, Handler)>>) -> Vec<Handler> {
    handlers.borrow().iter().map(|(_, h)| Rc::clone(h)).collect()
}

fn remove_handler(handlers: &RefCell<Vec<(Subscription, Handler)>>, subscription: Subscription) -> bool {
    let mut handlers = handlers.borrow_mut();
    let before = handlers.len();
    handlers.retain(|(s, _)| *s != subscription);
    handlers.len() != before
}

impl PartialEq for ViewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ViewHandle {}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHandle")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_owns_itself() {
        let window = ViewHandle::window("main");
        assert!(window.is_window());
        assert_eq!(window.owning_window(), Some(window.clone()));
    }

    #[test]
    fn test_owning_window_walks_parent_chain() {
        let window = ViewHandle::window("main");
        let panel = ViewHandle::control("panel");
        let grid = ViewHandle::control("grid");
        panel.attach_to(&window);
        grid.attach_to(&panel);

        assert_eq!(grid.owning_window(), Some(window.clone()));
        assert_eq!(grid.parent(), Some(panel));
    }

    #[test]
    fn test_unattached_control_has_no_window() {
        let control = ViewHandle::control("floating");
        assert!(control.owning_window().is_none());
    }

    #[test]
    fn test_identity_not_value_equality() {
        let a = ViewHandle::control("same");
        let b = ViewHandle::control("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_attached_fires_for_descendants_when_rooted() {
        let window = ViewHandle::window("main");
        let panel = ViewHandle::control("panel");
        let grid = ViewHandle::control("grid");
        grid.attach_to(&panel);

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        grid.on_attached(move |_| counter.set(counter.get() + 1));

        // Parent is not yet in a window.
        assert_eq!(fired.get(), 0);

        panel.attach_to(&window);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_remove_attached_stops_notification() {
        let window = ViewHandle::window("main");
        let control = ViewHandle::control("c");
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let sub = control.on_attached(move |_| flag.set(true));

        assert!(control.remove_attached(sub));
        assert!(!control.remove_attached(sub));
        control.attach_to(&window);
        assert!(!fired.get());
    }

    #[test]
    fn test_close_raises_once() {
        let window = ViewHandle::window("dialog");
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        window.on_closed(move |_| counter.set(counter.get() + 1));

        window.close();
        window.close();
        assert!(window.is_closed());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_close_on_control_is_ignored() {
        let control = ViewHandle::control("c");
        control.close();
        assert!(!control.is_closed());
    }

    #[test]
    fn test_windows_cannot_be_attached() {
        let outer = ViewHandle::window("outer");
        let inner = ViewHandle::window("inner");
        inner.attach_to(&outer);
        assert!(inner.parent().is_none());
        assert_eq!(inner.owning_window(), Some(inner));
    }

    #[test]
    fn test_attach_cycle_is_rejected() {
        let a = ViewHandle::control("a");
        let b = ViewHandle::control("b");
        b.attach_to(&a);
        a.attach_to(&b);
        assert!(a.parent().is_none());
        assert!(a.owning_window().is_none());
    }

    #[test]
    fn test_reattach_moves_between_windows() {
        let first = ViewHandle::window("first");
        let second = ViewHandle::window("second");
        let control = ViewHandle::control("c");

        control.attach_to(&first);
        control.attach_to(&second);
        assert_eq!(control.owning_window(), Some(second));
        let live_children = first
            .0
            .children
            .borrow()
            .iter()
            .filter(|c| c.strong_count() > 0)
            .count();
        assert_eq!(live_children, 0);
    }

    #[test]
    fn test_parent_link_does_not_keep_window_alive() {
        let control = ViewHandle::control("c");
        {
            let window = ViewHandle::window("temp");
            control.attach_to(&window);
            assert!(control.owning_window().is_some());
        }
        assert!(control.owning_window().is_none());
    }

    #[test]
    fn test_owner_is_weak() {
        let dialog = ViewHandle::window("dialog");
        {
            let owner = ViewHandle::window("owner");
            dialog.set_owner(&owner);
            assert_eq!(dialog.owner(), Some(owner.clone()));
        }
        assert!(dialog.owner().is_none());
    }
}

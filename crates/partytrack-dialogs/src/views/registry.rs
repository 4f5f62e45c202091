use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use super::handle::{Subscription, ViewHandle, ViewId};

/// Set of live views that may act as owners of dialogs.
///
/// Views whose window cannot be resolved yet are parked until their attached
/// notification fires. Every window hosting a registered view is watched so
/// that closing it unregisters all of its views. Registered controls are
/// followed when they move, so their new window is watched as well.
///
/// All methods must be called from the UI thread.
pub struct ViewRegistry {
    this: Weak<ViewRegistry>,
    state: RefCell<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    views: BTreeMap<ViewId, ViewHandle>,
    pending: HashMap<ViewId, Subscription>,
    watched_windows: HashMap<ViewId, Subscription>,
    moves: HashMap<ViewId, Subscription>,
}

impl ViewRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            state: RefCell::new(RegistryState::default()),
        })
    }

    /// Turn the "acts as a view" flag of `view` on or off.
    ///
    /// This is the entry point for UI code. Only a change of the flag has an
    /// effect: turning it on registers the view, turning it off unregisters it.
    pub fn set_can_open_windows(&self, view: &ViewHandle, value: bool) {
        if view.can_open_windows() == value {
            return;
        }
        view.set_can_open_windows_flag(value);

        if value {
            self.register(view);
        } else {
            self.unregister(view);
        }
    }

    /// Add `view` to the live set.
    ///
    /// If the view is not inside a window yet, registration is deferred until
    /// its attached notification fires.
    pub fn register(&self, view: &ViewHandle) {
        if self.is_registered(view) {
            return;
        }

        let Some(window) = view.owning_window() else {
            self.defer_registration(view);
            return;
        };

        if window.is_closed() {
            warn!(
                event = "dialogs.registry.register_skipped",
                view = %view.id(),
                window = %window.id(),
                reason = "window_closed"
            );
            return;
        }

        self.watch_window(&window);
        self.state.borrow_mut().views.insert(view.id(), view.clone());
        self.follow_moves(view);

        debug!(
            event = "dialogs.registry.view_registered",
            view = %view.id(),
            name = view.name(),
            window = %window.id()
        );
    }

    /// Remove `view` from the live set. Does nothing if it is absent.
    ///
    /// A deferred registration for `view` is cancelled as well.
    pub fn unregister(&self, view: &ViewHandle) {
        let (removed, pending, moves) = {
            let mut state = self.state.borrow_mut();
            (
                state.views.remove(&view.id()).is_some(),
                state.pending.remove(&view.id()),
                state.moves.remove(&view.id()),
            )
        };

        if let Some(subscription) = pending {
            view.remove_attached(subscription);
            debug!(event = "dialogs.registry.deferred_cancelled", view = %view.id());
        }
        if let Some(subscription) = moves {
            view.remove_attached(subscription);
        }

        if removed {
            debug!(event = "dialogs.registry.view_unregistered", view = %view.id());
        }
    }

    /// Snapshot of the registered views.
    pub fn views(&self) -> Vec<ViewHandle> {
        self.state.borrow().views.values().cloned().collect()
    }

    pub fn is_registered(&self, view: &ViewHandle) -> bool {
        self.state.borrow().views.contains_key(&view.id())
    }

    /// True while registration of `view` waits for its attached notification.
    pub fn is_pending(&self, view: &ViewHandle) -> bool {
        self.state.borrow().pending.contains_key(&view.id())
    }

    pub fn len(&self) -> usize {
        self.state.borrow().views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().views.is_empty()
    }

    fn defer_registration(&self, view: &ViewHandle) {
        if self.is_pending(view) {
            return;
        }

        let registry = self.this.clone();
        let subscription = view.on_attached(move |attached| {
            if let Some(registry) = registry.upgrade() {
                registry.late_register(attached);
            }
        });
        self.state
            .borrow_mut()
            .pending
            .insert(view.id(), subscription);

        debug!(
            event = "dialogs.registry.register_deferred",
            view = %view.id(),
            name = view.name()
        );
    }

    fn late_register(&self, view: &ViewHandle) {
        let subscription = self.state.borrow_mut().pending.remove(&view.id());
        let Some(subscription) = subscription else {
            return;
        };
        view.remove_attached(subscription);
        self.register(view);
    }

    // Windows are top-level and never attached, so only controls are followed.
    fn follow_moves(&self, view: &ViewHandle) {
        if view.is_window() || self.state.borrow().moves.contains_key(&view.id()) {
            return;
        }

        let registry = self.this.clone();
        let subscription = view.on_attached(move |moved| {
            if let Some(registry) = registry.upgrade() {
                registry.view_moved(moved);
            }
        });
        self.state.borrow_mut().moves.insert(view.id(), subscription);
    }

    fn view_moved(&self, view: &ViewHandle) {
        if !self.is_registered(view) {
            return;
        }
        let Some(window) = view.owning_window() else {
            return;
        };

        if window.is_closed() {
            warn!(
                event = "dialogs.registry.moved_into_closed_window",
                view = %view.id(),
                window = %window.id()
            );
            self.unregister(view);
            return;
        }

        self.watch_window(&window);
        debug!(
            event = "dialogs.registry.view_moved",
            view = %view.id(),
            window = %window.id()
        );
    }

    fn watch_window(&self, window: &ViewHandle) {
        if self
            .state
            .borrow()
            .watched_windows
            .contains_key(&window.id())
        {
            return;
        }

        let registry = self.this.clone();
        let subscription = window.on_closed(move |closed| {
            if let Some(registry) = registry.upgrade() {
                registry.owner_closed(closed);
            }
        });
        self.state
            .borrow_mut()
            .watched_windows
            .insert(window.id(), subscription);
    }

    fn owner_closed(&self, window: &ViewHandle) {
        let hosted: Vec<ViewHandle> = self
            .state
            .borrow()
            .views
            .values()
            .filter(|v| v.owning_window().is_some_and(|w| w.ptr_eq(window)))
            .cloned()
            .collect();

        for view in &hosted {
            self.unregister(view);
        }

        let subscription = self
            .state
            .borrow_mut()
            .watched_windows
            .remove(&window.id());
        if let Some(subscription) = subscription {
            window.remove_closed(subscription);
        }

        info!(
            event = "dialogs.registry.owner_closed",
            window = %window.id(),
            unregistered = hosted.len()
        );
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ViewRegistry")
            .field("views", &state.views.len())
            .field("pending", &state.pending.len())
            .field("watched_windows", &state.watched_windows.len())
            .field("moves", &state.moves.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &ViewRegistry) -> Vec<ViewId> {
        registry.views().iter().map(|v| v.id()).collect()
    }

    #[test]
    fn test_register_then_unregister_restores_set() {
        let registry = ViewRegistry::new();
        let main = ViewHandle::window("main");
        registry.register(&main);
        let before = ids(&registry);

        let view = ViewHandle::control("member-list");
        view.attach_to(&main);
        registry.register(&view);
        assert!(registry.is_registered(&view));
        registry.unregister(&view);

        assert_eq!(ids(&registry), before);
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        registry.register(&window);
        registry.register(&window);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_absent_view_is_noop() {
        let registry = ViewRegistry::new();
        registry.unregister(&ViewHandle::window("never"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_closing_window_cascades() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        let other = ViewHandle::window("other");
        let v1 = ViewHandle::control("v1");
        let v2 = ViewHandle::control("v2");
        let nested = ViewHandle::control("nested");
        v1.attach_to(&window);
        v2.attach_to(&window);
        nested.attach_to(&v2);

        for view in [&window, &other, &v1, &v2, &nested] {
            registry.register(view);
        }
        assert_eq!(registry.len(), 5);

        window.close();

        assert_eq!(ids(&registry), vec![other.id()]);
    }

    #[test]
    fn test_close_after_individual_unregister_does_not_panic() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        let view = ViewHandle::control("v");
        view.attach_to(&window);
        registry.register(&view);
        registry.unregister(&view);

        window.close();
        window.close();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_deferred_registration_completes_on_attach() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        let view = ViewHandle::control("late");

        registry.register(&view);
        assert!(!registry.is_registered(&view));
        assert!(registry.is_pending(&view));

        view.attach_to(&window);
        assert!(registry.is_registered(&view));
        assert!(!registry.is_pending(&view));
        assert_eq!(registry.len(), 1);

        // The attached subscription is gone: moving the view does not re-register.
        let second = ViewHandle::window("second");
        view.attach_to(&second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_deferred_registration_through_ancestor_attach() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        let frame = ViewHandle::control("frame");
        let page = ViewHandle::control("page");
        page.attach_to(&frame);

        registry.register(&page);
        assert!(registry.is_pending(&page));

        frame.attach_to(&window);
        assert!(registry.is_registered(&page));
    }

    #[test]
    fn test_unregister_cancels_deferred_registration() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        let view = ViewHandle::control("late");

        registry.register(&view);
        registry.unregister(&view);
        assert!(!registry.is_pending(&view));

        view.attach_to(&window);
        assert!(!registry.is_registered(&view));
    }

    #[test]
    fn test_set_can_open_windows_only_acts_on_change() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");

        registry.set_can_open_windows(&window, true);
        assert!(window.can_open_windows());
        assert!(registry.is_registered(&window));

        // Manual unregister; setting the same flag value again is not a change.
        registry.unregister(&window);
        registry.set_can_open_windows(&window, true);
        assert!(!registry.is_registered(&window));

        registry.register(&window);
        registry.set_can_open_windows(&window, false);
        assert!(!window.can_open_windows());
        assert!(!registry.is_registered(&window));
    }

    #[test]
    fn test_views_returns_a_copy() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        registry.register(&window);

        let mut snapshot = registry.views();
        snapshot.clear();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_in_closed_window_is_skipped() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        window.close();

        registry.register(&window);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_window_watched_once() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        let a = ViewHandle::control("a");
        let b = ViewHandle::control("b");
        a.attach_to(&window);
        b.attach_to(&window);
        registry.register(&a);
        registry.register(&b);

        assert_eq!(registry.state.borrow().watched_windows.len(), 1);
        window.close();
        assert!(registry.state.borrow().watched_windows.is_empty());
    }

    #[test]
    fn test_handlers_outlive_registry_safely() {
        let window = ViewHandle::window("main");
        let view = ViewHandle::control("late");
        {
            let registry = ViewRegistry::new();
            registry.register(&window);
            registry.register(&view);
        }
        view.attach_to(&window);
        window.close();
        assert!(window.is_closed());
    }

    #[test]
    fn test_view_moved_to_other_window_follows_its_close() {
        let registry = ViewRegistry::new();
        let a = ViewHandle::window("A");
        let b = ViewHandle::window("B");
        let view = ViewHandle::control("member-list");
        view.attach_to(&a);
        registry.register(&view);

        view.attach_to(&b);
        b.close();

        assert!(!registry.is_registered(&view));
        assert!(registry.state.borrow().moves.is_empty());
    }

    #[test]
    fn test_view_moved_away_survives_old_window_close() {
        let registry = ViewRegistry::new();
        let a = ViewHandle::window("A");
        let b = ViewHandle::window("B");
        let view = ViewHandle::control("member-list");
        view.attach_to(&a);
        registry.register(&view);

        view.attach_to(&b);
        a.close();

        assert!(registry.is_registered(&view));
        b.close();
        assert!(!registry.is_registered(&view));
    }

    #[test]
    fn test_moving_parent_carries_registered_child() {
        let registry = ViewRegistry::new();
        let a = ViewHandle::window("A");
        let b = ViewHandle::window("B");
        let panel = ViewHandle::control("panel");
        let view = ViewHandle::control("member-list");
        panel.attach_to(&a);
        view.attach_to(&panel);
        registry.register(&view);

        panel.attach_to(&b);
        b.close();

        assert!(!registry.is_registered(&view));
    }

    #[test]
    fn test_view_moved_into_closed_window_is_unregistered() {
        let registry = ViewRegistry::new();
        let a = ViewHandle::window("A");
        let b = ViewHandle::window("B");
        let view = ViewHandle::control("member-list");
        view.attach_to(&a);
        registry.register(&view);

        b.close();
        view.attach_to(&b);

        assert!(!registry.is_registered(&view));
    }

    // Cascade only follows the current containment: a view detached before
    // its window closes is no longer hosted by it.
    #[test]
    fn test_detached_view_is_not_hosted_by_closed_window() {
        let registry = ViewRegistry::new();
        let window = ViewHandle::window("main");
        let view = ViewHandle::control("moved");
        view.attach_to(&window);
        registry.register(&view);

        view.detach();
        window.close();
        assert!(registry.is_registered(&view));
        assert!(view.owning_window().is_none());
    }
}

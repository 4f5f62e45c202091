use std::rc::Rc;

use tracing::{debug, warn};

use super::handle::ViewHandle;
use super::registry::ViewRegistry;
use crate::dialog::errors::DialogError;
use crate::view_model::ViewModelRef;

/// Finds the window that should own dialogs requested by a view-model.
#[derive(Debug, Clone)]
pub struct DialogResolver {
    registry: Rc<ViewRegistry>,
}

impl DialogResolver {
    pub fn new(registry: Rc<ViewRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Rc<ViewRegistry> {
        &self.registry
    }

    /// Locate the window hosting the single registered view bound to `view_model`.
    ///
    /// # Errors
    ///
    /// - `ViewModelNotBound` if no registered view, or more than one, has
    ///   `view_model` as its data context
    /// - `OrphanedView` if the bound view is not inside any open window
    pub fn find_owner_window(&self, view_model: &ViewModelRef) -> Result<ViewHandle, DialogError> {
        let mut bound = self
            .registry
            .views()
            .into_iter()
            .filter(|v| v.is_bound_to(view_model));

        let view = match (bound.next(), bound.next()) {
            (Some(view), None) => view,
            (first, _) => {
                let matches = if first.is_none() { 0 } else { 2 + bound.count() };
                warn!(
                    event = "dialogs.resolver.view_model_not_bound",
                    view_model = %view_model.view_model_type(),
                    matches = matches
                );
                return Err(DialogError::ViewModelNotBound {
                    view_model: view_model.view_model_type().name(),
                    matches,
                });
            }
        };

        let window = view
            .owning_window()
            .filter(|w| !w.is_closed())
            .ok_or_else(|| {
                warn!(
                    event = "dialogs.resolver.orphaned_view",
                    view = %view.id(),
                    name = view.name()
                );
                DialogError::OrphanedView {
                    view: view.name().to_string(),
                }
            })?;

        debug!(
            event = "dialogs.resolver.owner_found",
            view_model = %view_model.view_model_type(),
            view = %view.id(),
            window = %window.id()
        );

        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MainViewModel;
    struct MemberListViewModel;

    fn setup() -> (Rc<ViewRegistry>, DialogResolver) {
        let registry = ViewRegistry::new();
        let resolver = DialogResolver::new(Rc::clone(&registry));
        (registry, resolver)
    }

    #[test]
    fn test_window_bound_directly_is_its_own_owner() {
        let (registry, resolver) = setup();
        let vm1 = ViewModelRef::new(Rc::new(MainViewModel));
        let a = ViewHandle::window("A");
        a.set_data_context(vm1.clone());
        registry.register(&a);

        assert_eq!(resolver.find_owner_window(&vm1).unwrap(), a);
    }

    #[test]
    fn test_child_view_resolves_to_ancestor_window() {
        let (registry, resolver) = setup();
        let vm2 = ViewModelRef::new(Rc::new(MemberListViewModel));
        let a = ViewHandle::window("A");
        let b = ViewHandle::control("B");
        b.attach_to(&a);
        b.set_data_context(vm2.clone());
        registry.register(&b);

        assert_eq!(resolver.find_owner_window(&vm2).unwrap(), a);
    }

    #[test]
    fn test_unbound_view_model_fails() {
        let (registry, resolver) = setup();
        let window = ViewHandle::window("A");
        window.set_data_context(ViewModelRef::new(Rc::new(MainViewModel)));
        registry.register(&window);

        // Same type, different instance: identity is what counts.
        let stranger = ViewModelRef::new(Rc::new(MainViewModel));
        let err = resolver.find_owner_window(&stranger).unwrap_err();
        assert!(matches!(err, DialogError::ViewModelNotBound { matches: 0, .. }));
    }

    #[test]
    fn test_view_model_bound_twice_is_ambiguous() {
        let (registry, resolver) = setup();
        let vm = ViewModelRef::new(Rc::new(MemberListViewModel));
        let window = ViewHandle::window("A");
        let left = ViewHandle::control("left");
        let right = ViewHandle::control("right");
        left.attach_to(&window);
        right.attach_to(&window);
        left.set_data_context(vm.clone());
        right.set_data_context(vm.clone());
        registry.register(&left);
        registry.register(&right);

        let err = resolver.find_owner_window(&vm).unwrap_err();
        assert!(matches!(err, DialogError::ViewModelNotBound { matches: 2, .. }));
    }

    #[test]
    fn test_unregistered_view_is_not_considered() {
        let (registry, resolver) = setup();
        let vm = ViewModelRef::new(Rc::new(MainViewModel));
        let window = ViewHandle::window("A");
        window.set_data_context(vm.clone());
        registry.register(&window);
        registry.unregister(&window);

        assert!(resolver.find_owner_window(&vm).is_err());
    }

    #[test]
    fn test_view_detached_after_registration_is_orphaned() {
        let (registry, resolver) = setup();
        let vm = ViewModelRef::new(Rc::new(MemberListViewModel));
        let window = ViewHandle::window("A");
        let view = ViewHandle::control("B");
        view.attach_to(&window);
        view.set_data_context(vm.clone());
        registry.register(&view);

        view.detach();

        let err = resolver.find_owner_window(&vm).unwrap_err();
        assert!(matches!(err, DialogError::OrphanedView { ref view } if view == "B"));
    }

    #[test]
    fn test_moved_view_resolves_to_new_window_until_it_closes() {
        let (registry, resolver) = setup();
        let vm = ViewModelRef::new(Rc::new(MemberListViewModel));
        let a = ViewHandle::window("A");
        let b = ViewHandle::window("B");
        let view = ViewHandle::control("member-list");
        view.attach_to(&a);
        view.set_data_context(vm.clone());
        registry.register(&view);

        view.attach_to(&b);
        assert_eq!(resolver.find_owner_window(&vm).unwrap(), b);

        b.close();
        let err = resolver.find_owner_window(&vm).unwrap_err();
        assert!(matches!(err, DialogError::ViewModelNotBound { matches: 0, .. }));
    }
}

//! Type-erased view-model references.
//!
//! View-models are plain Rust values shared through `Rc`. The dialog service
//! only needs two things from them: reference identity (to find the view a
//! view-model is bound to) and the concrete type (to pick a dialog window).

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Identity of a view-model type. Equality and hashing use the `TypeId` only.
#[derive(Clone, Copy)]
pub struct ViewModelType {
    id: TypeId,
    name: &'static str,
}

impl ViewModelType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Full type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ViewModelType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ViewModelType {}

impl Hash for ViewModelType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ViewModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ViewModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Shared, type-erased reference to a view-model instance.
///
/// The mapped type is the `T` inside `Rc<T>`. View-models that need to be
/// mutated by their dialog use interior mutability on their fields.
#[derive(Clone)]
pub struct ViewModelRef {
    inner: Rc<dyn Any>,
    ty: ViewModelType,
}

impl ViewModelRef {
    pub fn new<T: Any>(view_model: Rc<T>) -> Self {
        Self {
            inner: view_model,
            ty: ViewModelType::of::<T>(),
        }
    }

    pub fn view_model_type(&self) -> ViewModelType {
        self.ty
    }

    /// Reference identity: true when both point at the same instance.
    pub fn same_instance(&self, other: &ViewModelRef) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.inner), Rc::as_ptr(&other.inner))
    }

    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.inner).downcast::<T>().ok()
    }
}

impl<T: Any> From<Rc<T>> for ViewModelRef {
    fn from(view_model: Rc<T>) -> Self {
        Self::new(view_model)
    }
}

impl fmt::Debug for ViewModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewModelRef")
            .field("type", &self.ty)
            .field("ptr", &Rc::as_ptr(&self.inner))
            .finish()
    }
}

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::dialog::errors::DialogError;
use crate::dialog::traits::DialogWindow;
use crate::view_model::ViewModelType;

/// Identity of a dialog window type together with its constructor.
///
/// Equality compares the window type only.
#[derive(Clone, Copy)]
pub struct WindowType {
    id: TypeId,
    name: &'static str,
    construct: fn() -> Box<dyn DialogWindow>,
}

impl WindowType {
    pub fn of<W: DialogWindow + Default + 'static>() -> Self {
        Self {
            id: TypeId::of::<W>(),
            name: std::any::type_name::<W>(),
            construct: construct_window::<W>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Create a fresh, unbound instance of the window.
    pub fn instantiate(&self) -> Box<dyn DialogWindow> {
        (self.construct)()
    }
}

fn construct_window<W: DialogWindow + Default + 'static>() -> Box<dyn DialogWindow> {
    Box::new(W::default())
}

impl PartialEq for WindowType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WindowType {}

impl fmt::Debug for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Immutable table from view-model type to dialog window type.
///
/// Built once at startup with [`ViewModelTypeMap::builder`]. Lookups are by
/// exact type; there is no fallback window.
pub struct ViewModelTypeMap {
    mappings: HashMap<ViewModelType, WindowType>,
}

impl ViewModelTypeMap {
    pub fn builder() -> TypeMapBuilder {
        TypeMapBuilder::default()
    }

    /// Window type registered for `view_model_type`.
    pub fn resolve(&self, view_model_type: ViewModelType) -> Result<WindowType, DialogError> {
        match self.mappings.get(&view_model_type) {
            Some(window_type) => Ok(*window_type),
            None => {
                warn!(
                    event = "dialogs.type_map.mapping_not_found",
                    view_model = %view_model_type
                );
                Err(DialogError::MappingNotFound {
                    view_model: view_model_type.name(),
                })
            }
        }
    }

    pub fn contains(&self, view_model_type: ViewModelType) -> bool {
        self.mappings.contains_key(&view_model_type)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViewModelType, WindowType)> + '_ {
        self.mappings.iter().map(|(vm, w)| (*vm, *w))
    }
}

impl fmt::Debug for ViewModelTypeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.mappings.iter()).finish()
    }
}

/// Collects view-model → window pairs for a [`ViewModelTypeMap`].
#[derive(Default)]
pub struct TypeMapBuilder {
    mappings: HashMap<ViewModelType, WindowType>,
    duplicate: Option<DialogError>,
}

impl TypeMapBuilder {
    /// Show view-models of type `Vm` in windows of type `W`.
    pub fn map<Vm: 'static, W: DialogWindow + Default + 'static>(self) -> Self {
        self.map_type(ViewModelType::of::<Vm>(), WindowType::of::<W>())
    }

    pub fn map_type(mut self, view_model_type: ViewModelType, window_type: WindowType) -> Self {
        if let Some(existing) = self.mappings.get(&view_model_type) {
            if self.duplicate.is_none() {
                self.duplicate = Some(DialogError::DuplicateMapping {
                    view_model: view_model_type.name(),
                    existing: existing.name(),
                    replacement: window_type.name(),
                });
            }
            return self;
        }
        self.mappings.insert(view_model_type, window_type);
        self
    }

    /// Finish the table.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMapping` for the first view-model type mapped twice.
    pub fn build(self) -> Result<ViewModelTypeMap, DialogError> {
        if let Some(error) = self.duplicate {
            return Err(error);
        }

        debug!(
            event = "dialogs.type_map.built",
            mappings = self.mappings.len()
        );

        Ok(ViewModelTypeMap {
            mappings: self.mappings,
        })
    }
}

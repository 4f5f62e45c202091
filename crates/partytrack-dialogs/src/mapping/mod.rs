pub mod type_map;

// Re-export public API
pub use type_map::{TypeMapBuilder, ViewModelTypeMap, WindowType};

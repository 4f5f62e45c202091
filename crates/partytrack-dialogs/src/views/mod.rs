pub mod handle;
pub mod registry;
pub mod resolver;

// Re-export public API
pub use handle::{Subscription, ViewHandle, ViewId, ViewKind};
pub use registry::ViewRegistry;
pub use resolver::DialogResolver;

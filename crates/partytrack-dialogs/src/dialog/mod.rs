pub mod controller;
pub mod errors;
pub mod message_box;
pub mod traits;
pub mod types;

// Re-export public API
pub use controller::DialogController;
pub use errors::DialogError;
pub use message_box::{MessageBoxButtons, MessageBoxIcon, MessageBoxRequest, MessageBoxResult};
pub use traits::DialogWindow;
pub use types::DialogResult;

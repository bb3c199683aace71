//! User interface components
//!
//! - `keymapper` - Key event to input action conversion
//! - `renderer` - Scrollback and prompt rendering

pub mod keymapper;
pub mod renderer;

pub use keymapper::{InputAction, KeyMapper};
pub use renderer::Renderer;

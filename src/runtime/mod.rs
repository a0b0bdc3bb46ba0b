//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window management and the fixed tick
//! - `input` - Keyboard and wheel events collected into per-tick snapshots

pub mod app;
pub mod input;

pub use app::App;

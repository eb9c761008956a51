//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, memory elsewhere)
//! - Rendering (DOM updates and KaTeX typesetting on web)
//!
//! HTML fragment building is platform-independent so it can be tested natively.

pub mod html;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod storage;

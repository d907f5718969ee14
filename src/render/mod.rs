//! Presentation: terminal screens, the printable document, bold markup and
//! the loading animation.

pub mod document;
pub mod loading;
pub mod markup;
pub mod terminal;

pub use document::render_document;
pub use loading::{LONG_WAIT, LONG_WAIT_NOTICE, LoadingProgress, TICK_INTERVAL};

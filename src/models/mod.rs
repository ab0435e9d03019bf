//! Infrakit API model types.

mod alert;
mod document;
mod folder;
mod project;

pub use alert::*;
pub use document::*;
pub use folder::*;
pub use project::*;

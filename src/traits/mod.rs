//! Trait definitions for Infrakit operations.
//!
//! Each entity type implements the traits it supports, encapsulating
//! API differences in the implementations.

mod create;
mod get;
mod list;

pub use create::Create;
pub use get::Get;
pub use list::List;

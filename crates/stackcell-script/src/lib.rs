//! Stackcell Script - RON loader for catalog content
//!
//! Loads from RON files:
//! - Unit kind definitions with their electric and fluid stats
//! - Container swap entries (empty container + fluid ⇄ filled container)
//! - Engine configuration
//!
//! The loaded [`Definitions`] build a ready-to-use `Catalog`.

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{Definitions, Loader};
pub use schema::kind::KindDef;
pub use schema::swap::SwapDef;

//! Schema definitions for RON content files

pub mod kind;
pub mod swap;

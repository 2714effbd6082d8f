//! Request handlers, one module per resource.

pub mod file;
pub mod health;
pub mod note;

//! Page generation modules
//!
//! Each page module turns a source document into a complete HTML document
//! using the shared components.

pub mod post;

//! Reusable HTML components for post pages
//!
//! Maud component functions used by the page generators. The bio and code
//! block components are independent of each other; the layout wraps them
//! into a complete document.

pub mod bio;
pub mod code;
pub mod layout;

//! Filter/sort model for list pages and its backend (sanitized) form.

pub mod filter;
pub mod list;
pub mod sort;
pub mod wire;

pub use filter::*;
pub use list::*;
pub use sort::*;
pub use wire::*;

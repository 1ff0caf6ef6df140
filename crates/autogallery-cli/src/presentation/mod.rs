//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod gallery_display;
pub mod tables;

pub use gallery_display::{print_gallery, print_listing, print_warnings};
pub use tables::{format_optional, print_separator, truncate_string};

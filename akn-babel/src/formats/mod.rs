//! Format implementations
//!
//! This module contains the format implementations that load documents into the shared
//! [`Tree`](crate::tree::Tree) and write them back out.

pub mod akn;
pub mod html;

pub use akn::AknFormat;
pub use html::HtmlFormat;

//! Input records produced by the site-analysis step and the project form.

pub mod types;
pub use types::*;

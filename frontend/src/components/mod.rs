//! UI Components for the classifier page.
//!
//! # Layout Components
//! - [`Hero`] - Page title
//!
//! # Feature Components
//! - [`UploadSection`] - Picker, drag & drop, preview, reset and submit
//! - [`ResultPanel`] - Label and confidence of the last prediction

mod hero;
mod result;
mod upload;

pub use hero::*;
pub use result::*;
pub use upload::*;

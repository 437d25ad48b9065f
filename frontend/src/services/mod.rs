//! External communication.
//!
//! - [`predict`] - multipart upload to the inference endpoint

pub mod predict;

pub use predict::*;

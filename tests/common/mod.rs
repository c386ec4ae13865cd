//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{camera_image, TestCatalog};
//!
//! #[test]
//! fn test_camera_album() {
//!     let catalog = TestCatalog::new();
//!     catalog.insert(camera_image(1000));
//!     assert_eq!(catalog.facade.query_albums(None).unwrap().len(), 1);
//! }
//! ```

#![allow(dead_code)]

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
pub use fixtures::*;

//! Entities and shared infrastructure for daolab.
//!
//! ## Features
//!
//! - **Entities**: products, companies with their products, photos with comments
//! - **Relationship helpers**: keep both sides of parent/child links in step
//! - **Core Infrastructure**: configuration, data storage, errors, messaging, logging
//!
//! ## Usage
//!
//! ```rust
//! use daolab::libs::photo::{Photo, PhotoComment};
//!
//! let mut photo = Photo::new("https://example.com/a.png", None);
//! photo.add_comment(PhotoComment::new("nice"));
//! assert_eq!(photo.comments().len(), 1);
//! ```

pub mod company;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod logging;
pub mod messages;
pub mod photo;
pub mod product;

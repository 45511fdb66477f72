//! Core model: segments, carets and the host interface.

pub mod combine;
pub mod cursor;
pub mod host;
pub mod locator;
pub mod segment;
pub mod text;

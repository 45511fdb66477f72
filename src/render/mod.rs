//! Rendering segment sequences into a host.

pub mod area;

pub use area::{emoji_style, render, replace};

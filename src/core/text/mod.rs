//! Text helpers (markup tokens, entities, emoji resolution, char offsets).
//!
//! These helpers are pure (string in/string out) and live under `core` so the segment model and
//! the widgets can share them.

pub mod emoji;
pub mod markup;
pub mod utils;

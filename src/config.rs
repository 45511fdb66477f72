//! Environment configuration.

use std::env;

pub const DEFAULT_EMOJI_SIZE: u32 = 20;

const EMOJI_SIZE_VAR: &str = "SEGMENTED_INPUT_EMOJI_SIZE";
const EMOJI_BASE_VAR: &str = "SEGMENTED_INPUT_EMOJI_BASE";
const DEBUG_VAR: &str = "SEGMENTED_INPUT_DEBUG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Side of the square box emoji images render in, in px.
    pub emoji_size: u32,
    /// Artwork base URL for resolved emoji; the resolver default when unset.
    pub emoji_base_url: Option<String>,
    pub debug: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            emoji_size: DEFAULT_EMOJI_SIZE,
            emoji_base_url: None,
            debug: false,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            emoji_size: env_u32_opt(EMOJI_SIZE_VAR).unwrap_or(DEFAULT_EMOJI_SIZE),
            emoji_base_url: env_string_opt(EMOJI_BASE_VAR),
            debug: env_flag(DEBUG_VAR),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_u32_opt(key: &str) -> Option<u32> {
    env_string_opt(key)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}

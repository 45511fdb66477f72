//! Emoji resolution seam.
//!
//! Segmentation only needs two pure functions from an emoji library: resolve unicode emoji in a
//! string into image tags, and turn one picked emoji into its tag. [`Twemoji`] provides both on
//! top of the `emoji_markup` crate.

use std::borrow::Cow;

use emoji_markup::{emoji_image_tag, resolve_emoji, EmojiOptions};

use crate::config::EnvConfig;

pub trait EmojiResolver {
    /// Replaces unicode emoji in `text` with image tags. Must leave emoji-free text unchanged.
    fn resolve<'a>(&self, text: &'a str) -> Cow<'a, str>;

    /// Image tag for a single emoji, or `None` when `emoji` is not one.
    fn image_tag(&self, emoji: &str) -> Option<String>;
}

/// Twemoji-style resolver.
#[derive(Debug, Clone, Default)]
pub struct Twemoji {
    options: EmojiOptions,
}

impl Twemoji {
    pub fn new(options: EmojiOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        match &config.emoji_base_url {
            Some(base_url) => Self::new(EmojiOptions::with_base_url(base_url.clone())),
            None => Self::default(),
        }
    }
}

impl EmojiResolver for Twemoji {
    fn resolve<'a>(&self, text: &'a str) -> Cow<'a, str> {
        resolve_emoji(text, &self.options)
    }

    fn image_tag(&self, emoji: &str) -> Option<String> {
        emoji_image_tag(emoji, &self.options)
    }
}

//! Editable content area mixing text, emoji images and line breaks.

use tracing::{debug, warn};

use crate::config::EnvConfig;
use crate::core::combine::{caret_step, combine_tracked};
use crate::core::cursor::{CaretPosition, CaretStep};
use crate::core::host::{Host, NodeId};
use crate::core::locator::{get_position, set_end_position, set_position};
use crate::core::segment::{segment, with_leading_anchor};
use crate::core::text::emoji::{EmojiResolver, Twemoji};
use crate::core::text::markup::to_plain_text;
use crate::core::text::utils::{newlines_to_breaks, normalize_newlines};
use crate::error::HostError;
use crate::render::area::replace;

/// What an insert did to the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Caret read before the insert.
    pub before: CaretPosition,
    /// Step from `before` to just after the inserted content.
    pub step: CaretStep,
    /// Position the caret was moved to.
    pub caret: CaretPosition,
    /// False when the host refused the new caret; it then stays where the host put it.
    pub repositioned: bool,
}

pub struct EmojiInput<H: Host, R: EmojiResolver = Twemoji> {
    host: H,
    area: NodeId,
    resolver: R,
    emoji_size: u32,
    on_change: Option<Box<dyn FnMut(String)>>,
}

impl<H: Host> EmojiInput<H, Twemoji> {
    pub fn new(host: H, area: NodeId, config: &EnvConfig) -> Self {
        Self::with_resolver(host, area, Twemoji::from_config(config), config.emoji_size)
    }
}

impl<H: Host, R: EmojiResolver> EmojiInput<H, R> {
    pub fn with_resolver(host: H, area: NodeId, resolver: R, emoji_size: u32) -> Self {
        Self {
            host,
            area,
            resolver,
            emoji_size,
            on_change: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn area(&self) -> NodeId {
        self.area
    }

    pub fn set_on_change(&mut self, handler: Option<Box<dyn FnMut(String)>>) {
        self.on_change = handler;
    }

    /// Rendered markup of the area.
    pub fn markup(&self) -> String {
        self.host.inner_markup(self.area)
    }

    /// Semantic value of the area, emoji as unicode.
    pub fn plain_text(&self) -> String {
        to_plain_text(&self.markup())
    }

    pub fn caret(&self) -> CaretPosition {
        get_position(&self.host, self.area)
    }

    pub fn set_end_position(&mut self) -> Result<(), HostError> {
        set_end_position(&mut self.host, self.area)
    }

    pub fn set_position(&mut self, position: CaretPosition) -> Result<(), HostError> {
        set_position(&mut self.host, self.area, position)
    }

    /// Inserts pasted or picked content at the caret and re-renders the area.
    ///
    /// `raw` may hold text, unicode emoji, emoji image tags and break markup; newlines become
    /// hard breaks. Errors come only from rebuilding the area. A caret the host refuses to take
    /// is logged and reported through [`InsertOutcome::repositioned`].
    pub fn insert(&mut self, raw: &str) -> Result<InsertOutcome, HostError> {
        let before = get_position(&self.host, self.area);
        let markup = self.host.inner_markup(self.area);
        let existing = with_leading_anchor(segment(&markup, &self.resolver));
        let normalized = normalize_newlines(raw);
        let inserting = segment(&newlines_to_breaks(&normalized), &self.resolver);

        let combined = combine_tracked(&existing, &inserting, before);
        let step = caret_step(&existing, &combined.segments, &inserting);

        replace(&mut self.host, self.area, &combined.segments, self.emoji_size)?;

        let repositioned = match set_position(&mut self.host, self.area, combined.landing) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, landing = ?combined.landing, "failed to restore caret");
                false
            }
        };
        debug!(?before, ?step, caret = ?combined.landing, "inserted content");

        self.emit_change();
        Ok(InsertOutcome {
            before,
            step,
            caret: combined.landing,
            repositioned,
        })
    }

    /// Inserts one emoji picked by the user. Anything the resolver does not know is inserted as
    /// text.
    pub fn insert_emoji(&mut self, emoji: &str) -> Result<InsertOutcome, HostError> {
        match self.resolver.image_tag(emoji) {
            Some(tag) => self.insert(&tag),
            None => self.insert(emoji),
        }
    }

    fn emit_change(&mut self) {
        let text = self.plain_text();
        if let Some(handler) = self.on_change.as_mut() {
            handler(text);
        }
    }
}

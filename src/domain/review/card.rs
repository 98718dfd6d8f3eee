//! ReviewCard - presentation state for a single review.

use chrono::{Local, TimeZone};
use std::borrow::Cow;
use std::fmt;

use super::Review;

/// Reviews longer than this many characters are collapsed by default.
///
/// Counted in Unicode scalar values, so text made of astral-plane characters
/// such as emoji stays whole up to 150 of them.
pub const TRUNCATE_AT: usize = 150;

const ELLIPSIS: &str = "...";

/// A review plus its local expand/collapse toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCard {
    review: Review,
    expanded: bool,
}

impl ReviewCard {
    pub fn new(review: Review) -> Self {
        Self {
            review,
            expanded: false,
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn review(&self) -> &Review {
        &self.review
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// True when the text is long enough to be collapsed.
    pub fn is_truncatable(&self) -> bool {
        self.review.review.chars().count() > TRUNCATE_AT
    }

    /// Flips the expanded flag. No-op for short reviews.
    pub fn toggle(&mut self) {
        if self.is_truncatable() {
            self.expanded = !self.expanded;
        }
    }

    /// Text to show given the current toggle state.
    pub fn display_text(&self) -> Cow<'_, str> {
        if self.expanded || !self.is_truncatable() {
            return Cow::Borrowed(&self.review.review);
        }
        let prefix: String = self.review.review.chars().take(TRUNCATE_AT).collect();
        Cow::Owned(prefix + ELLIPSIS)
    }

    /// "Show more" / "Show less", or None when the text fits.
    pub fn toggle_label(&self) -> Option<&'static str> {
        if !self.is_truncatable() {
            None
        } else if self.expanded {
            Some("Show less")
        } else {
            Some("Show more")
        }
    }

    /// Creation time in the local time zone.
    pub fn formatted_timestamp(&self) -> String {
        self.formatted_timestamp_in(&Local)
    }

    pub fn formatted_timestamp_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.review.timestamp.format_display_in(tz)
    }

    pub fn summary(&self) -> &str {
        &self.review.ai_summary
    }

    /// Recommended actions, or None when the server sent none.
    pub fn recommended_actions(&self) -> Option<&[String]> {
        if self.review.recommended_actions.is_empty() {
            None
        } else {
            Some(&self.review.recommended_actions)
        }
    }
}

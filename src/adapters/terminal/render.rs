//! Plain-text rendering of dashboard views.
//!
//! Charts are drawn as horizontal bars scaled to `BAR_WIDTH` columns.

use chrono::TimeZone;
use std::fmt::{self, Write};

use crate::application::{AdminDashboardView, NavLink, UserDashboardView, APP_TITLE};
use crate::domain::review::ReviewCard;

const BAR_WIDTH: usize = 40;
const RULE: &str = "────────────────────────────────────────────────────────────";

pub fn render_nav(links: &[NavLink]) -> String {
    let items: Vec<String> = links
        .iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.label)
            } else {
                link.label.to_string()
            }
        })
        .collect();
    format!("{}    {}\n{}\n", APP_TITLE, items.join("  "), RULE)
}

pub fn render_user_dashboard(view: &UserDashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}\n", view.intro);

    let rating = view.rating.map(|r| r.stars()).unwrap_or_else(|| "☆☆☆☆☆".to_string());
    let _ = writeln!(out, "Rating: {}", rating);
    let _ = writeln!(out, "Your Review:");
    if view.review_text.is_empty() {
        let _ = writeln!(out, "  (Tell us about your experience...)");
    } else {
        for line in view.review_text.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "\n! {}", error);
    }

    let button = if view.submit_disabled {
        format!("[ {} ] (disabled)", view.submit_label)
    } else {
        format!("[ {} ]", view.submit_label)
    };
    let _ = writeln!(out, "\n{}", button);

    if let Some(panel) = &view.response {
        let _ = writeln!(out, "\n{}\n{}", panel.title, RULE);
        let _ = writeln!(out, "{}", panel.body);
        let _ = writeln!(out, "\n{}", panel.footer);
    }
    out
}

pub fn render_review_card<Tz>(card: &ReviewCard, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let review = card.review();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        review.rating.stars(),
        card.formatted_timestamp_in(tz)
    );
    let _ = writeln!(out, "{}", card.display_text());
    if let Some(label) = card.toggle_label() {
        let _ = writeln!(out, "  ({})", label);
    }
    let _ = writeln!(out, "AI Summary: {}", card.summary());
    if let Some(actions) = card.recommended_actions() {
        let _ = writeln!(out, "Recommended Actions:");
        for action in actions {
            let _ = writeln!(out, "  • {}", action);
        }
    }
    out
}

pub fn render_admin_dashboard<Tz>(view: &AdminDashboardView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "Admin Dashboard");
    let _ = writeln!(out, "Monitor and analyze customer feedback\n");

    if view.show_loading {
        let _ = writeln!(out, "Loading dashboard...");
        return out;
    }

    if let Some(summary) = &view.summary {
        let _ = writeln!(out, "Average Rating: {} out of 5.0", summary.average_rating);
        let _ = writeln!(out, "Total Reviews:  {} submissions", summary.total_reviews);
        let _ = writeln!(out, "Trend:          {} vs previous 7 days\n", summary.trend_label());

        let _ = writeln!(out, "Rating Distribution");
        let max = view.distribution.iter().map(|b| b.count).max().unwrap_or(0);
        for bar in &view.distribution {
            let _ = writeln!(out, "  {:<8} {} {}", bar.label, bar_of(bar.count, max), bar.count);
        }

        let _ = writeln!(out, "\nRecent Trends");
        for point in &view.trend {
            let _ = writeln!(
                out,
                "  {:<16} avg {:.2}  count {}",
                point.period, point.avg_rating, point.count
            );
        }
        let _ = writeln!(out);
    }

    let filter_label = view
        .filter_options
        .iter()
        .find(|(rating, _)| *rating == view.rating_filter)
        .map(|(_, label)| label.as_str())
        .unwrap_or("All Ratings");
    let _ = writeln!(out, "Filter by Rating: {}", filter_label);
    let _ = writeln!(out, "Search Reviews:   {}", view.search_term);
    let _ = writeln!(out, "{}", RULE);

    if let Some(empty) = &view.empty_state {
        let _ = writeln!(out, "{}\n{}", empty.title, empty.hint);
    }
    for card in &view.cards {
        let _ = writeln!(out, "{}{}", render_review_card(card, tz), RULE);
    }

    if let Some(pagination) = &view.pagination {
        let previous = if pagination.previous_disabled { "(Previous)" } else { "< Previous" };
        let next = if pagination.next_disabled { "(Next)" } else { "Next >" };
        let _ = writeln!(out, "{}  {}  {}", previous, pagination.label(), next);
    }
    out
}

fn bar_of(count: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let width = ((count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width)
}

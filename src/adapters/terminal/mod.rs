//! Terminal adapter - renders dashboard views as plain text.

mod render;

pub use render::{render_admin_dashboard, render_nav, render_review_card, render_user_dashboard};

//! Application layer - the dashboards and their lifecycle.
//!
//! Dashboards coordinate the domain state machines with the `ReviewApi`
//! port and own the timers that drive them.

pub mod admin_dashboard;
pub mod app;
pub mod scheduler;
pub mod user_dashboard;

pub use admin_dashboard::{
    AdminDashboard, AdminDashboardSettings, AdminDashboardView, EmptyState, DEFAULT_POLL_INTERVAL,
};
pub use app::{App, DashboardSettings, NavLink, Page, Route, RouteError, APP_TITLE};
pub use scheduler::ScheduledTask;
pub use user_dashboard::{
    ResponsePanel, SubmissionError, UserDashboard, UserDashboardView, DEFAULT_RESET_DELAY,
    SUBMIT_FALLBACK_ERROR,
};

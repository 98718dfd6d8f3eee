//! App shell - routes between the customer form and the admin view.
//!
//! Only one dashboard is mounted at a time. Navigating replaces the active
//! dashboard, and dropping it releases its timers.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::admin_dashboard::{AdminDashboard, AdminDashboardSettings};
use super::user_dashboard::{UserDashboard, DEFAULT_RESET_DELAY};
use crate::ports::ReviewApi;

pub const APP_TITLE: &str = "Review Feedback System";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("No page at '{0}'")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    User,
    Admin,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::User, Route::Admin];

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        match path.trim_end_matches('/') {
            "" => Ok(Route::User),
            "/admin" => Ok(Route::Admin),
            other => Err(RouteError::NotFound(other.to_string())),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::User => "/",
            Route::Admin => "/admin",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Route::User => "User Dashboard",
            Route::Admin => "Admin Dashboard",
        }
    }
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Timing and paging knobs shared by both dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    pub reset_delay: Duration,
    pub admin: AdminDashboardSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            admin: AdminDashboardSettings::default(),
        }
    }
}

/// The mounted dashboard.
pub enum Page {
    User(UserDashboard),
    Admin(AdminDashboard),
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Page::User(_) => Route::User,
            Page::Admin(_) => Route::Admin,
        }
    }
}

pub struct App {
    api: Arc<dyn ReviewApi>,
    settings: DashboardSettings,
    page: Option<Page>,
}

impl App {
    pub fn new(api: Arc<dyn ReviewApi>, settings: DashboardSettings) -> Self {
        Self {
            api,
            settings,
            page: None,
        }
    }

    /// Unmounts the current dashboard and mounts the one at `path`.
    pub async fn navigate(&mut self, path: &str) -> Result<&Page, RouteError> {
        let route = Route::parse(path)?;
        if let Some(old) = self.page.take() {
            tracing::debug!(from = old.route().path(), to = route.path(), "Unmounting dashboard");
        }

        let page = match route {
            Route::User => Page::User(UserDashboard::with_reset_delay(
                self.api.clone(),
                self.settings.reset_delay,
            )),
            Route::Admin => {
                Page::Admin(AdminDashboard::mount(self.api.clone(), self.settings.admin).await)
            }
        };
        Ok(self.page.insert(page))
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn route(&self) -> Option<Route> {
        self.page.as_ref().map(Page::route)
    }

    pub fn user_dashboard(&self) -> Option<&UserDashboard> {
        match &self.page {
            Some(Page::User(dashboard)) => Some(dashboard),
            _ => None,
        }
    }

    pub fn admin_dashboard(&self) -> Option<&AdminDashboard> {
        match &self.page {
            Some(Page::Admin(dashboard)) => Some(dashboard),
            _ => None,
        }
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        let current = self.route();
        Route::ALL
            .iter()
            .map(|route| NavLink {
                label: route.nav_label(),
                path: route.path(),
                active: current == Some(*route),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{Endpoint, InMemoryReviewApi};

    #[test]
    fn routes_parse_known_paths() {
        assert_eq!(Route::parse("/"), Ok(Route::User));
        assert_eq!(Route::parse(""), Ok(Route::User));
        assert_eq!(Route::parse("/admin"), Ok(Route::Admin));
        assert_eq!(Route::parse("/admin/"), Ok(Route::Admin));
        assert_eq!(
            Route::parse("/settings"),
            Err(RouteError::NotFound("/settings".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn navigating_mounts_matching_dashboard() {
        let api = Arc::new(InMemoryReviewApi::new());
        let mut app = App::new(api.clone(), DashboardSettings::default());
        assert!(app.route().is_none());

        app.navigate("/").await.unwrap();
        assert!(app.user_dashboard().is_some());
        assert_eq!(api.call_count(Endpoint::Analytics).await, 0);

        app.navigate("/admin").await.unwrap();
        assert!(app.admin_dashboard().is_some());
        assert!(app.user_dashboard().is_none());
        assert_eq!(api.call_count(Endpoint::Analytics).await, 1);

        let links = app.nav_links();
        assert_eq!(links[0].label, "User Dashboard");
        assert!(!links[0].active);
        assert_eq!(links[1].path, "/admin");
        assert!(links[1].active);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_admin_stops_its_poll_timer() {
        let api = Arc::new(InMemoryReviewApi::new());
        let mut app = App::new(api.clone(), DashboardSettings::default());

        app.navigate("/admin").await.unwrap();
        app.navigate("/").await.unwrap();
        tokio::time::sleep(Duration::from_secs(90)).await;

        assert_eq!(api.call_count(Endpoint::Analytics).await, 1);
    }

    #[tokio::test]
    async fn unknown_path_keeps_current_page() {
        let api = Arc::new(InMemoryReviewApi::new());
        let mut app = App::new(api, DashboardSettings::default());
        app.navigate("/").await.unwrap();

        assert!(app.navigate("/nope").await.is_err());
        assert_eq!(app.route(), Some(Route::User));
    }
}

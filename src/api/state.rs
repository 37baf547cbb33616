//! Application state for shared services

use std::sync::Arc;

use crate::api::settings::SettingsController;
use crate::domain::{Authorizer, TeamRepository};
use crate::infrastructure::notice::NoticeManager;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub teams: Arc<dyn TeamRepository>,
    pub settings: Arc<SettingsController>,
    /// Path of the settings page; also the redirect target after every action
    pub page_path: String,
    /// Name of the cookie carrying the notice session token
    pub session_cookie: String,
}

impl AppState {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        notices: NoticeManager,
        authorizer: Arc<dyn Authorizer>,
        page_path: impl Into<String>,
        session_cookie: impl Into<String>,
    ) -> Self {
        let settings = SettingsController::new(teams.clone(), notices, authorizer);

        Self {
            teams,
            settings: Arc::new(settings),
            page_path: page_path.into(),
            session_cookie: session_cookie.into(),
        }
    }
}

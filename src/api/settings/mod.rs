//! Settings page - team administration with post-redirect-get

pub mod action;
pub mod controller;
pub mod page;

use axum::{
    extract::{rejection::FormRejection, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::debug;

pub use action::{SettingsAction, SettingsForm, TeamForm};
pub use controller::{Dispatch, MenuPage, RequestContext, SettingsController};

use crate::api::middleware::{CurrentActor, Session};
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::DomainError;

/// GET handler: render the page with the pending notice
pub async fn show_page(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    session: Session,
) -> Result<Response, ApiError> {
    let ctx = RequestContext::new(actor, session.id().clone());

    let mut response = match state.settings.menu_page(&ctx).await {
        Ok(page) => Html(page::render_menu_page(&page)).into_response(),
        Err(DomainError::PermissionDenied { message }) => {
            (StatusCode::FORBIDDEN, Html(format!("<p>{}</p>", message))).into_response()
        }
        Err(e) => return Err(e.into()),
    };

    session.attach(&mut response, &state.session_cookie);
    Ok(response)
}

/// POST handler: dispatch the submitted action, then redirect back with 303
pub async fn submit(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    session: Session,
    RawQuery(query): RawQuery,
    form: Result<Form<SettingsForm>, FormRejection>,
) -> Response {
    let action = match form {
        Ok(Form(form)) => SettingsAction::from_form(form),
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable settings form");
            None
        }
    };

    let ctx = RequestContext::new(actor, session.id().clone());
    state.settings.dispatch(&ctx, action).await;

    let mut response = Redirect::to(&redirect_target(&state.page_path, query.as_deref())).into_response();
    session.attach(&mut response, &state.session_cookie);
    response
}

fn redirect_target(page_path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", page_path, query),
        _ => page_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target_keeps_query() {
        assert_eq!(
            redirect_target("/admin/h4a-client", Some("page=h4a-client")),
            "/admin/h4a-client?page=h4a-client"
        );
        assert_eq!(redirect_target("/admin/h4a-client", Some("")), "/admin/h4a-client");
        assert_eq!(redirect_target("/admin/h4a-client", None), "/admin/h4a-client");
    }
}

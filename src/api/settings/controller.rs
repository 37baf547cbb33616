//! Settings controller - dispatches settings actions and schedules their notices

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::action::{SettingsAction, TeamForm};
use crate::domain::team::parse_identificators;
use crate::domain::{
    Actor, Authorizer, DomainError, Notice, SessionId, Team, TeamId, TeamRepository,
};
use crate::infrastructure::notice::NoticeManager;
use crate::infrastructure::sanitize::{sanitize_optional_field, sanitize_text_field};

pub const PERMISSION_DENIED: &str = "Fehlende Berechtigung.";
pub const TEAM_SAVED: &str = "Team erfolgreich gespeichert.";
pub const TEAM_SAVE_FAILED: &str = "Fehler beim Speichern des Teams: ";
pub const TEAM_DELETED: &str = "Team erfolgreich gelöscht.";
pub const TEAM_DELETE_FAILED: &str = "Fehler beim Löschen des Teams: ";
pub const TEAMS_LOAD_FAILED: &str = "Fehler beim Laden der Teams: ";

/// Who is asking, and which session receives the resulting notice
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: Actor,
    pub session: SessionId,
}

impl RequestContext {
    pub fn new(actor: Actor, session: SessionId) -> Self {
        Self { actor, session }
    }
}

/// What happened to a submitted form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// No known action was named
    Ignored,
    /// The actor lacks the capability; no handler ran
    Denied,
    Handled,
}

/// Everything the settings page shows
#[derive(Debug, Clone, Default)]
pub struct MenuPage {
    pub teams: Vec<Team>,
    pub notices: Vec<Notice>,
}

pub struct SettingsController {
    repository: Arc<dyn TeamRepository>,
    notices: NoticeManager,
    authorizer: Arc<dyn Authorizer>,
}

impl SettingsController {
    pub fn new(
        repository: Arc<dyn TeamRepository>,
        notices: NoticeManager,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            repository,
            notices,
            authorizer,
        }
    }

    /// Run a submitted action
    ///
    /// The capability is checked before any handler runs. Every outcome of a
    /// handled action is reported through a notice for the next page load.
    pub async fn dispatch(&self, ctx: &RequestContext, action: Option<SettingsAction>) -> Dispatch {
        let Some(action) = action else {
            debug!("No settings action requested");
            return Dispatch::Ignored;
        };

        if !self.authorizer.may_administer(&ctx.actor) {
            warn!(actor = %ctx.actor.label(), action = action.name(), "Settings action denied");
            self.notices
                .add(&ctx.session, Notice::error(PERMISSION_DENIED))
                .await;
            return Dispatch::Denied;
        }

        debug!(actor = %ctx.actor.label(), action = action.name(), "Dispatching settings action");

        let notice = match action {
            SettingsAction::EditTeam(form) => self.save_team(form).await,
            SettingsAction::DeleteTeam { id } => self.delete_team(&id).await,
        };

        self.notices.add(&ctx.session, notice).await;
        Dispatch::Handled
    }

    /// Collect the settings page content, consuming the pending notice
    pub async fn menu_page(&self, ctx: &RequestContext) -> Result<MenuPage, DomainError> {
        if !self.authorizer.may_administer(&ctx.actor) {
            warn!(actor = %ctx.actor.label(), "Settings page denied");
            return Err(DomainError::permission_denied(PERMISSION_DENIED));
        }

        let mut page = MenuPage::default();

        if let Some(notice) = self.notices.take(&ctx.session).await {
            page.notices.push(notice);
        }

        match self.repository.get_teams().await {
            Ok(teams) => page.teams = teams,
            Err(e) => {
                let message = e.detail();
                page.notices
                    .push(Notice::error(format!("{}{}", TEAMS_LOAD_FAILED, message)));
            }
        }

        Ok(page)
    }

    async fn save_team(&self, form: TeamForm) -> Notice {
        let team = match team_from_form(&form) {
            Ok(team) => team,
            Err(e) => {
                debug!(error = %e, "Rejected team form");
                return Notice::error(format!("{}{}", TEAM_SAVE_FAILED, e.detail()));
            }
        };

        match self.repository.save_team(team).await {
            Ok(saved) => {
                info!(
                    id = ?saved.id().map(|id| id.value()),
                    internal_name = %saved.internal_name(),
                    "Team saved"
                );
                Notice::success(TEAM_SAVED)
            }
            Err(e) => Notice::error(format!("{}{}", TEAM_SAVE_FAILED, e.detail())),
        }
    }

    async fn delete_team(&self, raw_id: &str) -> Notice {
        let id = match TeamId::parse(&sanitize_text_field(raw_id)) {
            Ok(id) => id,
            Err(e) => {
                let e = DomainError::from(e);
                return Notice::error(format!("{}{}", TEAM_DELETE_FAILED, e.detail()));
            }
        };

        match self.repository.delete_team(id).await {
            Ok(true) => {
                info!(id = %id, "Team deleted");
                Notice::success(TEAM_DELETED)
            }
            Ok(false) => Notice::error(format!(
                "{}Team '{}' existiert nicht.",
                TEAM_DELETE_FAILED, id
            )),
            Err(e) => Notice::error(format!("{}{}", TEAM_DELETE_FAILED, e.detail())),
        }
    }
}

/// Build a team from the sanitized form; `-1` as id means "create"
fn team_from_form(form: &TeamForm) -> Result<Team, DomainError> {
    let id = parse_form_id(&sanitize_text_field(&form.id))?;

    let identificators = sanitize_optional_field(form.identificators.as_deref())
        .map(|value| parse_identificators(&value))
        .unwrap_or_default();

    let team = Team::new(sanitize_text_field(&form.internal_name))?
        .with_identificators(identificators)
        .with_league_url(sanitize_optional_field(form.league_url.as_deref()))
        .with_cup_url(sanitize_optional_field(form.cup_url.as_deref()));

    Ok(match id {
        Some(id) => team.with_id(id),
        None => team,
    })
}

fn parse_form_id(raw: &str) -> Result<Option<TeamId>, DomainError> {
    if raw.parse::<i64>() == Ok(-1) {
        return Ok(None);
    }

    Ok(Some(TeamId::parse(raw)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::MockTeamRepository;
    use crate::domain::{SchemaManager, Severity};
    use crate::infrastructure::notice::InMemoryNoticeStore;
    use crate::infrastructure::storage::{connect, DatabaseConfig, SqliteSchemaManager, TableNames};
    use crate::infrastructure::team::SqliteTeamRepository;

    #[derive(Debug)]
    struct StaticAuthorizer(bool);

    impl Authorizer for StaticAuthorizer {
        fn may_administer(&self, _actor: &Actor) -> bool {
            self.0
        }
    }

    #[test]
    fn test_parse_form_id() {
        assert_eq!(parse_form_id("-1").unwrap(), None);
        assert_eq!(parse_form_id("7").unwrap(), Some(TeamId::new(7).unwrap()));
        assert!(matches!(parse_form_id("abc"), Err(DomainError::InvalidId { .. })));
        assert!(matches!(parse_form_id("0"), Err(DomainError::InvalidId { .. })));
    }

    fn notices() -> NoticeManager {
        NoticeManager::new(Arc::new(InMemoryNoticeStore::new()))
    }

    fn context() -> RequestContext {
        RequestContext::new(Actor::with_token("admin-token"), SessionId::generate())
    }

    fn controller(repository: Arc<dyn TeamRepository>, allowed: bool) -> (SettingsController, NoticeManager) {
        let notices = notices();
        let controller = SettingsController::new(
            repository,
            notices.clone(),
            Arc::new(StaticAuthorizer(allowed)),
        );
        (controller, notices)
    }

    async fn sqlite_repository() -> Arc<SqliteTeamRepository> {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        let tables = TableNames::new("h4ac_").unwrap();
        SqliteSchemaManager::new(pool.clone(), tables.clone())
            .create_tables()
            .await
            .unwrap();
        Arc::new(SqliteTeamRepository::new(pool, tables))
    }

    fn edit(id: &str, internal_name: &str) -> SettingsAction {
        SettingsAction::EditTeam(TeamForm {
            id: id.to_string(),
            internal_name: internal_name.to_string(),
            ..TeamForm::default()
        })
    }

    #[tokio::test]
    async fn test_long_input_is_saved_not_rejected() {
        let repository = sqlite_repository().await;
        let (controller, notices) = controller(repository.clone(), true);
        let ctx = context();
        let name = "H".repeat(300);

        let action = SettingsAction::EditTeam(TeamForm {
            id: "-1".to_string(),
            internal_name: name.clone(),
            identificators: Some("x".repeat(150)),
            ..TeamForm::default()
        });
        controller.dispatch(&ctx, Some(action)).await;

        let notice = notices.take(&ctx.session).await.unwrap();
        assert_eq!(notice.severity(), Severity::Success);

        let teams = repository.get_teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].internal_name(), name);
        assert_eq!(teams[0].identificators_str(), "x".repeat(150));
    }

    #[tokio::test]
    async fn test_create_team_end_to_end() {
        let repository = sqlite_repository().await;
        let (controller, notices) = controller(repository.clone(), true);
        let ctx = context();

        let action = SettingsAction::EditTeam(TeamForm {
            id: "-1".to_string(),
            internal_name: "Herren1".to_string(),
            identificators: Some("H1".to_string()),
            league_url: Some("http://x".to_string()),
            cup_url: Some(String::new()),
        });

        assert_eq!(controller.dispatch(&ctx, Some(action)).await, Dispatch::Handled);

        let teams = repository.get_teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert!(teams[0].id().is_some());
        assert_eq!(teams[0].internal_name(), "Herren1");
        assert_eq!(teams[0].identificators_str(), "H1");
        assert_eq!(teams[0].league_url(), Some("http://x"));
        assert_eq!(teams[0].cup_url(), None);

        let page = controller.menu_page(&ctx).await.unwrap();
        assert_eq!(page.teams.len(), 1);
        assert_eq!(page.notices.len(), 1);
        assert_eq!(page.notices[0].severity(), Severity::Success);
        assert_eq!(page.notices[0].message(), TEAM_SAVED);
        assert!(page.notices[0].is_dismissible());

        // delivered exactly once
        assert!(notices.take(&ctx.session).await.is_none());
        assert!(controller.menu_page(&ctx).await.unwrap().notices.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_end_to_end() {
        let repository = sqlite_repository().await;
        let (controller, notices) = controller(repository.clone(), true);
        let ctx = context();

        controller.dispatch(&ctx, Some(edit("-1", "Herren 1"))).await;
        let id = repository.get_teams().await.unwrap()[0].id().unwrap();

        controller
            .dispatch(&ctx, Some(edit(&id.to_string(), "Herren I")))
            .await;
        let teams = repository.get_teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].internal_name(), "Herren I");

        controller
            .dispatch(&ctx, Some(SettingsAction::DeleteTeam { id: id.to_string() }))
            .await;
        assert!(repository.get_teams().await.unwrap().is_empty());

        let notice = notices.take(&ctx.session).await.unwrap();
        assert_eq!(notice.message(), TEAM_DELETED);
    }

    #[tokio::test]
    async fn test_permission_denied_runs_no_handler() {
        let mut repository = MockTeamRepository::new();
        repository.expect_save_team().never();
        repository.expect_delete_team().never();

        let (controller, notices) = controller(Arc::new(repository), false);
        let ctx = RequestContext::new(Actor::anonymous(), SessionId::generate());

        let dispatch = controller.dispatch(&ctx, Some(edit("-1", "Herren 1"))).await;

        assert_eq!(dispatch, Dispatch::Denied);
        let notice = notices.take(&ctx.session).await.unwrap();
        assert_eq!(notice.severity(), Severity::Error);
        assert_eq!(notice.message(), PERMISSION_DENIED);
    }

    #[tokio::test]
    async fn test_missing_action_is_ignored() {
        let repository = MockTeamRepository::new();
        let (controller, notices) = controller(Arc::new(repository), false);
        let ctx = context();

        assert_eq!(controller.dispatch(&ctx, None).await, Dispatch::Ignored);
        assert!(notices.take(&ctx.session).await.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_reports_its_own_error() {
        let mut repository = MockTeamRepository::new();
        repository
            .expect_save_team()
            .times(1)
            .returning(|_| Err(DomainError::storage("disk I/O error")));
        // another request's failure left behind in the shared repository
        repository
            .expect_last_error()
            .never()
            .returning(|| Some("database is locked".to_string()));

        let (controller, notices) = controller(Arc::new(repository), true);
        let ctx = context();

        controller.dispatch(&ctx, Some(edit("-1", "Herren 1"))).await;

        let notice = notices.take(&ctx.session).await.unwrap();
        assert_eq!(notice.severity(), Severity::Error);
        assert_eq!(
            notice.message(),
            "Fehler beim Speichern des Teams: disk I/O error"
        );
    }

    #[tokio::test]
    async fn test_existing_id_is_passed_to_repository() {
        let mut repository = MockTeamRepository::new();
        repository
            .expect_save_team()
            .withf(|team| team.id().map(|id| id.value()) == Some(5))
            .times(1)
            .returning(Ok);

        let (controller, notices) = controller(Arc::new(repository), true);
        let ctx = context();

        controller.dispatch(&ctx, Some(edit(" 5 ", "Herren 1"))).await;

        assert_eq!(notices.take(&ctx.session).await.unwrap().message(), TEAM_SAVED);
    }

    #[tokio::test]
    async fn test_fields_are_sanitized() {
        let mut repository = MockTeamRepository::new();
        repository
            .expect_save_team()
            .withf(|team| {
                team.id().is_none()
                    && team.internal_name() == "Herren 1"
                    && team.identificators() == ["H1".to_string(), "Herren I".to_string()]
                    && team.league_url().is_none()
                    && team.cup_url() == Some("http://cup")
            })
            .times(1)
            .returning(Ok);

        let (controller, _) = controller(Arc::new(repository), true);

        let action = SettingsAction::EditTeam(TeamForm {
            id: "-1".to_string(),
            internal_name: "  <b>Herren</b>\n 1 ".to_string(),
            identificators: Some("H1, Herren I ,".to_string()),
            league_url: Some("   ".to_string()),
            cup_url: Some(" http://cup ".to_string()),
        });

        assert_eq!(controller.dispatch(&context(), Some(action)).await, Dispatch::Handled);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_storage() {
        let mut repository = MockTeamRepository::new();
        repository.expect_save_team().never();

        let (controller, notices) = controller(Arc::new(repository), true);
        let ctx = context();

        for action in [edit("abc", "Herren 1"), edit("", "Herren 1"), edit("-1", " <i></i> ")] {
            assert_eq!(controller.dispatch(&ctx, Some(action)).await, Dispatch::Handled);

            let notice = notices.take(&ctx.session).await.unwrap();
            assert_eq!(notice.severity(), Severity::Error);
            assert!(notice.message().starts_with(TEAM_SAVE_FAILED));
        }
    }

    #[tokio::test]
    async fn test_delete_missing_team_is_error_notice() {
        let mut repository = MockTeamRepository::new();
        repository
            .expect_delete_team()
            .times(1)
            .returning(|_| Ok(false));

        let (controller, notices) = controller(Arc::new(repository), true);
        let ctx = context();

        controller
            .dispatch(&ctx, Some(SettingsAction::DeleteTeam { id: "42".to_string() }))
            .await;

        let notice = notices.take(&ctx.session).await.unwrap();
        assert_eq!(notice.severity(), Severity::Error);
        assert!(notice.message().contains("'42'"));
    }

    #[tokio::test]
    async fn test_delete_with_bad_id() {
        let mut repository = MockTeamRepository::new();
        repository.expect_delete_team().never();

        let (controller, notices) = controller(Arc::new(repository), true);
        let ctx = context();

        controller
            .dispatch(&ctx, Some(SettingsAction::DeleteTeam { id: "-1".to_string() }))
            .await;

        let notice = notices.take(&ctx.session).await.unwrap();
        assert!(notice.message().starts_with(TEAM_DELETE_FAILED));
    }

    #[tokio::test]
    async fn test_menu_page_denied() {
        let mut repository = MockTeamRepository::new();
        repository.expect_get_teams().never();

        let (controller, notices) = controller(Arc::new(repository), false);
        let ctx = context();
        notices.add(&ctx.session, Notice::info("pending")).await;

        let result = controller.menu_page(&ctx).await;

        assert!(matches!(result, Err(DomainError::PermissionDenied { .. })));
        // the pending notice survives for an authorized visit
        assert!(notices.take(&ctx.session).await.is_some());
    }

    #[tokio::test]
    async fn test_menu_page_reports_load_failure() {
        let mut repository = MockTeamRepository::new();
        repository
            .expect_get_teams()
            .returning(|| Err(DomainError::storage("no such table: h4ac_teams")));

        let (controller, _) = controller(Arc::new(repository), true);

        let page = controller.menu_page(&context()).await.unwrap();

        assert!(page.teams.is_empty());
        assert_eq!(page.notices.len(), 1);
        assert!(page.notices[0].message().contains("no such table"));
    }
}

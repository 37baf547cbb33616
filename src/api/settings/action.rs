//! Settings form actions

use serde::Deserialize;

/// Raw form submission of the settings page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub action: Option<String>,
    pub id: Option<String>,
    pub internal_name: Option<String>,
    pub identificators: Option<String>,
    pub league_url: Option<String>,
    pub cup_url: Option<String>,
}

/// Unsanitized fields of the team edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamForm {
    pub id: String,
    pub internal_name: String,
    pub identificators: Option<String>,
    pub league_url: Option<String>,
    pub cup_url: Option<String>,
}

/// Every action the settings page can dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    EditTeam(TeamForm),
    DeleteTeam { id: String },
}

impl SettingsAction {
    pub const EDIT_TEAM: &'static str = "h4ac-edit-team";
    pub const DELETE_TEAM: &'static str = "h4ac-delete-team";

    /// Recognise the submitted action; unknown or missing actions yield `None`
    pub fn from_form(form: SettingsForm) -> Option<Self> {
        let id = form.id.unwrap_or_default();

        match form.action.as_deref()? {
            Self::EDIT_TEAM => Some(Self::EditTeam(TeamForm {
                id,
                internal_name: form.internal_name.unwrap_or_default(),
                identificators: form.identificators,
                league_url: form.league_url,
                cup_url: form.cup_url,
            })),
            Self::DELETE_TEAM => Some(Self::DeleteTeam { id }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EditTeam(_) => Self::EDIT_TEAM,
            Self::DeleteTeam { .. } => Self::DELETE_TEAM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(action: Option<&str>, id: &str) -> SettingsForm {
        SettingsForm {
            action: action.map(str::to_string),
            id: Some(id.to_string()),
            ..SettingsForm::default()
        }
    }

    #[test]
    fn test_form_field_names() {
        let form: SettingsForm = serde_json::from_value(json!({
            "action": "h4ac-edit-team",
            "id": "-1",
            "internalName": "Herren1",
            "identificators": "H1",
            "leagueUrl": "http://x",
            "cupUrl": ""
        }))
        .unwrap();

        let action = SettingsAction::from_form(form).unwrap();

        assert_eq!(action.name(), SettingsAction::EDIT_TEAM);
        assert_eq!(
            action,
            SettingsAction::EditTeam(TeamForm {
                id: "-1".to_string(),
                internal_name: "Herren1".to_string(),
                identificators: Some("H1".to_string()),
                league_url: Some("http://x".to_string()),
                cup_url: Some(String::new()),
            })
        );
    }

    #[test]
    fn test_delete_team_action() {
        let action = SettingsAction::from_form(form(Some("h4ac-delete-team"), "4")).unwrap();

        assert_eq!(action, SettingsAction::DeleteTeam { id: "4".to_string() });
        assert_eq!(action.name(), SettingsAction::DELETE_TEAM);
    }

    #[test]
    fn test_unknown_action_is_not_dispatched() {
        assert!(SettingsAction::from_form(form(Some("h4ac-purge"), "4")).is_none());
        assert!(SettingsAction::from_form(form(None, "4")).is_none());
        assert!(SettingsAction::from_form(SettingsForm::default()).is_none());
    }
}

//! HTML of the settings page

use std::fmt::Write;

use super::action::SettingsAction;
use super::controller::MenuPage;
use crate::domain::Team;
use crate::infrastructure::notice::render_notice;
use crate::infrastructure::sanitize::escape_html;

const PAGE_TITLE: &str = "Handball4All Client";

/// Fills the edit form from a row's data attributes
const ADMIN_SCRIPT: &str = r#"
const form = document.getElementById('h4ac-team-form');
const buttonNew = document.getElementById('h4ac-new-team');
const legend = document.getElementById('new-edit-indicator');
const fields = ['id', 'internalName', 'identificators', 'leagueUrl', 'cupUrl'];

function setupForm(dataset) {
    for (const field of fields) {
        form.elements[field].value = dataset ? (dataset[field.toLowerCase()] || '') : '';
    }
    if (!dataset) {
        form.elements['id'].value = '-1';
    }
    legend.textContent = dataset ? 'Team bearbeiten' : 'Neues Team erstellen';
    buttonNew.style.display = dataset ? 'initial' : 'none';
}

document.querySelectorAll('button.h4ac-edit-team').forEach((item) => {
    item.addEventListener('click', (event) => setupForm(event.target.dataset));
});
buttonNew.addEventListener('click', () => setupForm(null));
"#;

/// Render the complete settings page
pub fn render_menu_page(page: &MenuPage) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    html.push_str("</head>\n<body>\n");

    for notice in &page.notices {
        html.push_str(&render_notice(notice));
        html.push('\n');
    }

    let _ = writeln!(html, "<div class=\"wrap\">\n<h1>{}</h1>", PAGE_TITLE);
    html.push_str("<section>\n<h2>Teams</h2>\n");

    if page.teams.is_empty() {
        html.push_str("<p>Zum aktuellen Zeitpunkt befinden sich keine Teams in der Datenbank.</p>\n");
    } else {
        render_team_table(&mut html, &page.teams);
    }

    render_team_form(&mut html);

    html.push_str("</section>\n</div>\n");
    let _ = writeln!(html, "<script>{}</script>", ADMIN_SCRIPT);
    html.push_str("</body>\n</html>\n");

    html
}

fn render_team_table(html: &mut String, teams: &[Team]) {
    html.push_str(
        "<table class=\"widefat\">\n<thead>\n<tr>\
         <th>Name (intern)</th><th>Identifikatoren</th><th>Link (Liga)</th>\
         <th>Link (Pokal)</th><th>Aktionen</th>\
         </tr>\n</thead>\n<tbody>\n",
    );

    for team in teams {
        let id = team.id().map(|id| id.to_string()).unwrap_or_default();
        let name = escape_html(team.internal_name());
        let identificators = escape_html(&team.identificators_str());
        let league_url = escape_html(team.league_url().unwrap_or_default());
        let cup_url = escape_html(team.cup_url().unwrap_or_default());

        let _ = write!(
            html,
            "<tr><td>{name}</td><td>{identificators}</td><td>{league_url}</td><td>{cup_url}</td><td>\
             <button type=\"button\" class=\"button-secondary h4ac-edit-team\" data-id=\"{id}\" \
             data-internalname=\"{name}\" data-identificators=\"{identificators}\" \
             data-leagueurl=\"{league_url}\" data-cupurl=\"{cup_url}\">Bearbeiten</button>\
             <form method=\"POST\">\
             <input type=\"hidden\" name=\"action\" value=\"{action}\" />\
             <input type=\"hidden\" name=\"id\" value=\"{id}\" />\
             <input type=\"submit\" value=\"Löschen\" class=\"button-secondary\" />\
             </form></td></tr>\n",
            action = SettingsAction::DELETE_TEAM,
        );
    }

    html.push_str("</tbody>\n</table>\n");
}

fn render_team_form(html: &mut String) {
    let _ = write!(
        html,
        "<h3>Hinzufügen / Bearbeiten</h3>\n\
         <button type=\"button\" id=\"h4ac-new-team\" style=\"display: none;\">Neues Team erstellen</button>\n\
         <form method=\"POST\" id=\"h4ac-team-form\">\n\
         <input type=\"hidden\" name=\"action\" value=\"{action}\">\n\
         <input type=\"hidden\" name=\"id\" value=\"-1\">\n\
         <fieldset>\n\
         <legend id=\"new-edit-indicator\">Neues Team erstellen</legend>\n\
         <p><strong>Vereinsinterner Name</strong><br>\
         Dieser Name wird in Widgets zu sehen sein.<br>\
         <input type=\"text\" name=\"internalName\"></p>\n\
         <p><strong>Identifikatoren</strong><br>\
         Bezeichnungen der Mannschaft auf Handball4All, mehrere durch Kommas getrennt.<br>\
         <input type=\"text\" name=\"identificators\"></p>\n\
         <p><strong>Link (Liga)</strong><br>\
         <input type=\"text\" name=\"leagueUrl\"></p>\n\
         <p><strong>Link (Pokal)</strong><br>\
         <input type=\"text\" name=\"cupUrl\"></p>\n\
         <input type=\"submit\" class=\"button-primary\" value=\"Speichern\">\n\
         </fieldset>\n\
         </form>\n",
        action = SettingsAction::EDIT_TEAM,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Notice, TeamId};

    fn team(id: i64, name: &str) -> Team {
        Team::new(name)
            .unwrap()
            .with_id(TeamId::new(id).unwrap())
            .with_identificators(vec!["H1".to_string(), "H-1".to_string()])
            .with_league_url(Some("http://h4a.test/?a=1&b=2".to_string()))
    }

    #[test]
    fn test_empty_page() {
        let html = render_menu_page(&MenuPage::default());

        assert!(html.contains("keine Teams in der Datenbank"));
        assert!(html.contains("value=\"h4ac-edit-team\""));
        assert!(!html.contains("class=\"notice"));
    }

    #[test]
    fn test_team_rows() {
        let page = MenuPage {
            teams: vec![team(3, "Herren 1")],
            notices: Vec::new(),
        };

        let html = render_menu_page(&page);

        assert!(html.contains("<td>Herren 1</td>"));
        assert!(html.contains("<td>H1,H-1</td>"));
        assert!(html.contains("http://h4a.test/?a=1&amp;b=2"));
        assert!(html.contains("value=\"h4ac-delete-team\""));
        assert!(html.contains("name=\"id\" value=\"3\""));
    }

    #[test]
    fn test_team_names_are_escaped() {
        let page = MenuPage {
            teams: vec![team(1, "A \"B\" <C>")],
            notices: Vec::new(),
        };

        let html = render_menu_page(&page);

        assert!(html.contains("A &quot;B&quot; &lt;C&gt;"));
        assert!(!html.contains("<C>"));
    }

    #[test]
    fn test_notices_are_rendered_first() {
        let page = MenuPage {
            teams: Vec::new(),
            notices: vec![Notice::success("Team erfolgreich gespeichert.")],
        };

        let html = render_menu_page(&page);
        let notice_at = html.find("notice-success").unwrap();
        let heading_at = html.find("<h1>").unwrap();

        assert!(notice_at < heading_at);
    }
}

//! Flash notice workflow: schedule, take once, render

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Notice, NoticeStore, SessionId, Severity};
use crate::infrastructure::sanitize::escape_html;

/// Schedules notices for the next page load of a session and hands them out once
#[derive(Debug, Clone)]
pub struct NoticeManager {
    store: Arc<dyn NoticeStore>,
}

impl NoticeManager {
    pub fn new(store: Arc<dyn NoticeStore>) -> Self {
        Self { store }
    }

    /// Schedule a notice for delivery
    ///
    /// A failing store is logged and otherwise ignored; the action that
    /// produced the notice has already happened.
    pub async fn add_notice(
        &self,
        session: &SessionId,
        message: impl Into<String>,
        severity: Severity,
        dismissible: bool,
    ) {
        let notice = Notice::new(message, severity).with_dismissible(dismissible);
        self.add(session, notice).await;
    }

    pub async fn add(&self, session: &SessionId, notice: Notice) {
        debug!(session = %session, severity = %notice.severity(), "Notice scheduled");

        if let Err(e) = self.store.put(session, notice).await {
            warn!(session = %session, error = %e, "Failed to store notice");
        }
    }

    /// Take the pending notice of a session; later calls return `None` until a new one is added
    pub async fn take(&self, session: &SessionId) -> Option<Notice> {
        match self.store.take(session).await {
            Ok(notice) => notice,
            Err(e) => {
                warn!(session = %session, error = %e, "Failed to read pending notice");
                None
            }
        }
    }
}

/// Severity-tagged markup for a notice; the message is HTML-escaped
pub fn render_notice(notice: &Notice) -> String {
    let dismissible = if notice.is_dismissible() {
        " is-dismissible"
    } else {
        ""
    };

    format!(
        r#"<div class="notice notice-{}{}"><p>{}</p></div>"#,
        notice.severity(),
        dismissible,
        escape_html(notice.message())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notice::InMemoryNoticeStore;

    fn manager() -> NoticeManager {
        NoticeManager::new(Arc::new(InMemoryNoticeStore::new()))
    }

    #[tokio::test]
    async fn test_notice_round_trip() {
        let notices = manager();
        let session = SessionId::generate();

        notices
            .add_notice(&session, "Saved", Severity::Success, true)
            .await;

        let notice = notices.take(&session).await.unwrap();
        assert_eq!(notice.severity(), Severity::Success);
        assert!(notice.is_dismissible());
        assert_eq!(
            render_notice(&notice),
            r#"<div class="notice notice-success is-dismissible"><p>Saved</p></div>"#
        );

        assert!(notices.take(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_take_without_pending_notice() {
        let notices = manager();
        assert!(notices.take(&SessionId::generate()).await.is_none());
    }

    #[test]
    fn test_render_not_dismissible() {
        let notice = Notice::warning("Achtung").with_dismissible(false);
        assert_eq!(
            render_notice(&notice),
            r#"<div class="notice notice-warning"><p>Achtung</p></div>"#
        );
    }

    #[test]
    fn test_render_escapes_message() {
        let notice = Notice::error("Fehler: <near \"x\">");
        let html = render_notice(&notice);

        assert!(html.contains("Fehler: &lt;near &quot;x&quot;&gt;"));
        assert!(!html.contains("<near"));
    }

    #[test]
    fn test_unknown_severity_renders_as_info() {
        let notice: Notice = serde_json::from_str(r#"["Hallo", "fatal", true]"#).unwrap();
        assert!(render_notice(&notice).starts_with(r#"<div class="notice notice-info is-dismissible">"#));
    }
}

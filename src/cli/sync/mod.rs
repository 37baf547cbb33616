//! Sync command - fetch league data from Handball4All

use clap::Args;
use tracing::{info, warn};

use crate::domain::TeamId;
use crate::infrastructure::h4a::{SyncOutcome, SyncReport};
use crate::Storage;

#[derive(Args, Clone, Debug)]
pub struct SyncArgs {
    /// Only sync the team with this id
    #[arg(long)]
    pub team: Option<i64>,
}

pub async fn run(args: SyncArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let storage = Storage::open(&config).await?;
    let service = crate::create_sync_service(&config, &storage)?;

    if let Some(id) = args.team {
        let id = TeamId::new(id)?;
        let outcome = service.sync_team_by_id(id).await?;
        info!(team_id = %id, outcome = ?outcome, "Sync finished");
        return Ok(());
    }

    let report = service.sync_all().await?;
    log_report(&report);

    if report.has_failures() {
        anyhow::bail!("{} of {} team(s) failed to sync", report.failed(), report.entries.len());
    }

    Ok(())
}

fn log_report(report: &SyncReport) {
    for entry in &report.entries {
        match &entry.outcome {
            SyncOutcome::Synced { games, scores } => {
                info!(team = %entry.internal_name, games, scores, "Synced")
            }
            SyncOutcome::Skipped => info!(team = %entry.internal_name, "Skipped, no league URL"),
            SyncOutcome::Failed(message) => {
                warn!(team = %entry.internal_name, error = %message, "Failed")
            }
        }
    }
}

use clap::Parser;
use h4a_admin::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Install => cli::schema::install().await,
        Command::Uninstall => cli::schema::uninstall().await,
        Command::Sync(args) => cli::sync::run(args).await,
    }
}

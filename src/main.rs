use clap::Parser;
use exampad_lib::bootstrap::run_app;
use exampad_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_app(cli).await
}

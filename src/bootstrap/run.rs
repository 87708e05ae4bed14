//! Run modes of the headless host.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use ep_app::app_paths::AppPaths;
use ep_app::usecases::{
    start_splash_timer, BootstrapSequencer, ReadinessLatch, RefreshOutcome, SequencerOutcome,
    SplashCacheStatus, SplashScreenState,
};
use ep_core::app_dirs::AppDirs;
use ep_core::bootstrap::{AuthState, SplashBackdrop};
use ep_core::ports::AppDirsPort;
use ep_platform::app_dirs::DirsAppDirsAdapter;
use tracing::{info, info_span, warn, Instrument};

use super::config::load_config_if_present;
use super::tracing::init_tracing_subscriber;
use super::wiring::{
    data_dir_override, resolve_settings, wire_dependencies, AppDeps, WiringError,
};
use crate::adapters::{spawn_auth_resolution, spawn_data_load};
use crate::cli::{Cli, Command};

/// What one headless bootstrap produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BootReport {
    pub outcome: SequencerOutcome,
    /// Splash background that was on screen when the main view took over.
    pub backdrop: SplashBackdrop,
    pub refresh: Option<RefreshOutcome>,
}

fn resolve_app_dirs(root_override: Option<PathBuf>) -> Result<AppDirs, WiringError> {
    DirsAppDirsAdapter::from_override(root_override)
        .get_app_dirs()
        .map_err(|e| WiringError::DataDir(e.to_string()))
}

/// Entry point: config → tracing → wiring → selected run mode.
pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => AppPaths::from_app_dirs(&resolve_app_dirs(cli.data_dir.clone())?).config_path,
    };
    let config = load_config_if_present(&config_path)?;

    let app_dirs = resolve_app_dirs(data_dir_override(cli.data_dir.clone(), &config))?;
    let settings = resolve_settings(&config, &app_dirs, cli.offline);
    init_tracing_subscriber(&settings.paths.logs_dir).context("Failed to initialize tracing")?;
    info!(config = %config_path.display(), "configuration loaded");

    let deps = wire_dependencies(settings).await?;

    match cli.command.unwrap_or(Command::Boot) {
        Command::Boot => {
            let report = boot(&deps, cli.identity.into()).await;
            println!("bootstrap: {:?}", report.outcome);
            println!("splash backdrop: {:?}", report.backdrop);
            if let Some(refresh) = report.refresh {
                println!("splash video refresh: {refresh:?}");
            }
        }
        Command::Refresh => {
            let outcome = deps.refresh_video.execute().await;
            println!("splash video refresh: {outcome:?}");
        }
        Command::ClearCache => {
            deps.clear_cache
                .execute()
                .await
                .context("Failed to clear splash cache")?;
            println!("splash cache cleared");
        }
        Command::Status => print_status(&deps.inspect_cache.execute().await),
        Command::Callback { location } => {
            match deps.payment_callback.execute(&location).await? {
                Some(target) => println!("{target}"),
                None => println!("not a payment callback: {location}"),
            }
        }
    }

    Ok(())
}

fn print_status(status: &SplashCacheStatus) {
    println!(
        "last downloaded: {}",
        status.last_downloaded_url.as_deref().unwrap_or("-")
    );
    match status.blob_bytes {
        Some(bytes) => println!("cached video: {bytes} bytes"),
        None => println!("cached video: none"),
    }
    match &status.cached_config {
        Some(config) => println!(
            "cached settings: use_custom={} type={:?} video={}",
            config.use_custom,
            config.splash_type,
            config.video_url.as_deref().unwrap_or("-")
        ),
        None => println!("cached settings: none"),
    }
    println!("cache current: {}", status.cache_current);
}

/// One full bootstrap, from the first splash frame to the notice modal.
///
/// ## Behavior / 行为
/// 1. Background refresh, auth and data collaborators start right away
/// 2. The splash renders with a neutral backdrop until its plan resolves
/// 3. The splash timer starts once the plan (and its duration) is known
/// 4. The sequencer waits for all three flags, then completes bootstrap
/// 5. The splash view is dropped, releasing any local video reference
pub async fn boot(deps: &AppDeps, identity: AuthState) -> BootReport {
    let span = info_span!("bootstrap.boot", ?identity);

    async {
        let latch = Arc::new(ReadinessLatch::new());

        // Independent of readiness: a slow download must not delay the main view.
        let refresh = deps
            .refresh_video
            .clone()
            .spawn_after(deps.settings.refresh_delay);
        let auth = spawn_auth_resolution(identity, latch.auth_signal());
        let data = spawn_data_load(deps.notices.clone(), latch.data_signal());

        let mut screen = SplashScreenState::Pending;
        info!(backdrop = ?screen.backdrop(), "splash view rendered");

        let plan = deps.prepare_splash.execute().await;
        let timer = start_splash_timer(plan.config().duration(), latch.timer_signal());
        screen = SplashScreenState::Ready(plan);
        info!(backdrop = ?screen.backdrop(), "splash media selected");

        let sequencer =
            BootstrapSequencer::new(latch.clone(), deps.emitter.clone(), deps.settings.notice_delay);
        let outcome = sequencer.run().await;

        let backdrop = screen.backdrop();
        drop(screen);

        for (name, handle) in [("splash timer", timer), ("auth", auth), ("data", data)] {
            if let Err(err) = handle.await {
                warn!(task = name, error = %err, "bootstrap task failed");
            }
        }
        let refresh = match refresh.await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(error = %err, "splash video refresh task failed");
                None
            }
        };

        BootReport {
            outcome,
            backdrop,
            refresh,
        }
    }
    .instrument(span)
    .await
}

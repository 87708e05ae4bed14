pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_if_present};
pub use run::run_app;
pub use wiring::{data_dir_override, resolve_settings, wire_dependencies, AppDeps, ResolvedSettings, WiringError};

use std::path::PathBuf;

use ep_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "exampad";
const PROFILE_ENV: &str = "EP_PROFILE";

/// `exampad`, or `exampad-<profile>` so profiles never share a cache.
fn app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DataRoot {
    /// Per-user data-local dir of the platform, plus the app dir name.
    Platform,
    /// Explicit root chosen by the operator, used as is.
    Explicit(PathBuf),
}

/// Resolves the application data root.
///
/// ## Behavior / 行为
/// - [`DirsAppDirsAdapter::new`]: `dirs::data_local_dir()/exampad[-<EP_PROFILE>]`
/// - [`DirsAppDirsAdapter::at`]: the given directory, untouched
pub struct DirsAppDirsAdapter {
    root: DataRoot,
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirsAppDirsAdapter {
    /// ```
    /// use ep_platform::app_dirs::DirsAppDirsAdapter;
    /// let _ = DirsAppDirsAdapter::new();
    /// ```
    pub fn new() -> Self {
        Self {
            root: DataRoot::Platform,
        }
    }

    /// Use `root` itself as the data root (`--data-dir`, `[storage] data_dir`).
    pub fn at(root: PathBuf) -> Self {
        Self {
            root: DataRoot::Explicit(root),
        }
    }

    /// Explicit root when one is given, the platform default otherwise.
    pub fn from_override(root: Option<PathBuf>) -> Self {
        root.map(Self::at).unwrap_or_default()
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let app_data_root = match &self.root {
            DataRoot::Explicit(root) => root.clone(),
            DataRoot::Platform => dirs::data_local_dir()
                .ok_or(AppDirsError::DataLocalDirUnavailable)?
                .join(app_dir_name()),
        };

        Ok(AppDirs { app_data_root })
    }
}

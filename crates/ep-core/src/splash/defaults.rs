use super::model::*;

pub const DEFAULT_LOGO_URL: &str = "assets/logo.png";
pub const DEFAULT_APP_NAME: &str = "ExamPad";
pub const DEFAULT_DEVELOPER_NAME: &str = "ExamPad Team";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_SPLASH_DURATION_SECS: f64 = 3.0;
/// Longer splash durations are treated as misconfiguration.
pub const MAX_SPLASH_DURATION_SECS: f64 = 60.0;

impl Default for SplashType {
    fn default() -> Self {
        SplashType::Image
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            logo_url: DEFAULT_LOGO_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            developer_name: DEFAULT_DEVELOPER_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            video_url: None,
            splash_type: SplashType::Image,
            background_image_url: None,
            duration_seconds: DEFAULT_SPLASH_DURATION_SECS,
            use_custom: false,
        }
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::defaults::{DEFAULT_SPLASH_DURATION_SECS, MAX_SPLASH_DURATION_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplashType {
    Video,
    Image,
}

impl SplashType {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "video" => Some(SplashType::Video),
            "image" => Some(SplashType::Image),
            _ => None,
        }
    }
}

/// The resolved configuration driving the bootstrap screen.
///
/// Always fully populated. Produced once per process start by
/// [`SplashConfig::from_candidate`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplashConfig {
    pub logo_url: String,
    pub app_name: String,
    pub developer_name: String,
    pub version: String,
    pub video_url: Option<String>,
    pub splash_type: SplashType,
    pub background_image_url: Option<String>,
    /// Always in `(0, MAX_SPLASH_DURATION_SECS]` when built by `from_candidate`.
    pub duration_seconds: f64,
    pub use_custom: bool,
}

impl SplashConfig {
    /// Build the effective configuration from a raw candidate document.
    ///
    /// ## Behavior / 行为
    /// - `useCustom` must be the JSON literal `true`; anything else (missing,
    ///   `false`, `"true"`, non-object candidate) yields the defaults unchanged.
    /// - Otherwise every field present in the candidate with a usable value
    ///   overrides the default; absent or unusable fields keep the default.
    pub fn from_candidate(candidate: &Value) -> Self {
        let defaults = Self::default();

        if candidate.get("useCustom").and_then(Value::as_bool) != Some(true) {
            return defaults;
        }

        Self {
            logo_url: text_field(candidate, "logoUrl").unwrap_or(defaults.logo_url),
            app_name: text_field(candidate, "appName").unwrap_or(defaults.app_name),
            developer_name: text_field(candidate, "developerName")
                .unwrap_or(defaults.developer_name),
            version: version_field(candidate).unwrap_or(defaults.version),
            video_url: text_field(candidate, "videoUrl").or(defaults.video_url),
            splash_type: text_field(candidate, "splashType")
                .and_then(|raw| SplashType::parse(&raw))
                .unwrap_or(defaults.splash_type),
            background_image_url: text_field(candidate, "backgroundImageUrl")
                .or(defaults.background_image_url),
            duration_seconds: duration_field(candidate).unwrap_or(defaults.duration_seconds),
            use_custom: true,
        }
    }

    /// Splash timer duration; an unusable `duration_seconds` gives the default.
    pub fn duration(&self) -> Duration {
        usable_duration(self.duration_seconds)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_SPLASH_DURATION_SECS))
    }

    /// True when this config asks for a custom video splash with a source.
    pub fn wants_custom_video(&self) -> bool {
        self.use_custom && self.splash_type == SplashType::Video && self.video_url.is_some()
    }
}

fn text_field(candidate: &Value, key: &str) -> Option<String> {
    candidate
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn version_field(candidate: &Value) -> Option<String> {
    match candidate.get("version")? {
        Value::Number(n) => Some(n.to_string()),
        _ => text_field(candidate, "version"),
    }
}

// Admin forms store the duration either as a number or as a numeric string.
fn duration_field(candidate: &Value) -> Option<f64> {
    let raw = candidate
        .get("durationSeconds")
        .or_else(|| candidate.get("duration"))?;

    let secs = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    usable_duration(secs)
}

fn usable_duration(secs: f64) -> Option<f64> {
    (secs.is_finite() && secs > 0.0 && secs <= MAX_SPLASH_DURATION_SECS).then_some(secs)
}

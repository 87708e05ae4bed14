//! # ep-core
//!
//! Core domain models and ports for the ExamPad bootstrap sequence and the
//! offline splash-asset cache.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod asset;
pub mod bootstrap;
pub mod config;
pub mod payment;
pub mod ports;
pub mod splash;

// Re-export commonly used types at the crate root
pub use asset::ObjectRef;
pub use bootstrap::{AuthState, BootstrapReadiness, BootstrapView, Notice};
pub use config::AppConfig;
pub use payment::{PaymentCallback, PaymentStatus};
pub use ports::errors::SplashCacheError;
pub use splash::{SplashConfig, SplashType};

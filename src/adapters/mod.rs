//! Headless stand-ins for the presentation layer and the auth/data
//! collaborators.

mod collaborators;
mod presentation;

pub use collaborators::{spawn_auth_resolution, spawn_data_load, RemoteNoticesLoader};
pub use presentation::{HeadlessNavigator, LoggingBootstrapEmitter};

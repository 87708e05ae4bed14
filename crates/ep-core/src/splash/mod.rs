//! Splash screen configuration: the data model, the hardcoded defaults and the
//! merge policy that turns a raw candidate document into an effective config.

mod defaults;
mod model;

pub use defaults::*;
pub use model::{SplashConfig, SplashType};

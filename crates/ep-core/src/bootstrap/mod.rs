//! Bootstrap readiness facts.
//! 启动就绪状态
//!
//! Three independent producers (splash timer, auth, bulk data load) each flip
//! one flag exactly once. The main application view renders only when all
//! three hold.

use serde::{Deserialize, Serialize};

/// Identity reported by the auth collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// Resolution still in flight.
    #[default]
    Unknown,
    LoggedIn,
    /// The user explicitly chose guest access.
    Guest,
    Anonymous,
}

impl AuthState {
    pub fn is_resolved(self) -> bool {
        self != AuthState::Unknown
    }

    /// Notices are only presented to signed-in users or explicit guests.
    pub fn may_see_notices(self) -> bool {
        matches!(self, AuthState::LoggedIn | AuthState::Guest)
    }
}

/// A pending notice delivered by the data collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReadiness {
    pub splash_timer_elapsed: bool,
    pub auth: AuthState,
    pub data_loaded: bool,
}

/// What the top-level view switcher should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapView {
    Splash,
    Preloader,
    Main,
}

/// Background used by the splash view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashBackdrop {
    /// Config resolution still pending; render a blank backdrop rather than block.
    Neutral,
    Image(Option<String>),
    Video,
}

impl BootstrapReadiness {
    pub fn auth_resolved(&self) -> bool {
        self.auth.is_resolved()
    }

    pub fn is_ready(&self) -> bool {
        self.splash_timer_elapsed && self.auth_resolved() && self.data_loaded
    }

    /// The most "closed" gate wins: a running splash timer hides a resolved
    /// auth/data state.
    pub fn view(&self) -> BootstrapView {
        if !self.splash_timer_elapsed {
            BootstrapView::Splash
        } else if !self.auth_resolved() || !self.data_loaded {
            BootstrapView::Preloader
        } else {
            BootstrapView::Main
        }
    }
}

//! Bootstrap sequencing: three readiness producers feeding one gate.

mod readiness;
mod sequencer;
mod splash_timer;

pub use readiness::{AuthSignal, BootstrapState, DataSignal, ReadinessLatch, SplashTimerSignal};
pub use sequencer::{BootstrapSequencer, SequencerOutcome, DEFAULT_NOTICE_DELAY};
pub use splash_timer::start_splash_timer;

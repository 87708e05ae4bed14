//! ExamPad bootstrap host.
//!
//! Assembles the `ep-*` crates into a runnable process: configuration,
//! tracing, dependency wiring and the headless presentation adapters.

pub mod adapters;
pub mod bootstrap;
pub mod cli;

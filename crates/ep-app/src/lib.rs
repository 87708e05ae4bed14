//! ExamPad Application Orchestration Layer
//!
//! This crate contains the bootstrap use cases: splash configuration
//! resolution, the splash video cache, the readiness sequencer and payment
//! callback normalization.

pub mod app_paths;
pub mod usecases;

//! EPTB Regimen Evaluation Test Suite
//!
//! Clinical scenario tests and property-based tests for the evaluation
//! engine, run against the public `eptb-core` API:
//! - Scenario tests for representative EPTB cases
//! - Property tests for calculators and rule invariants

pub mod scenarios;
pub mod property_tests;

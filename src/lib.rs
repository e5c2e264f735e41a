//! Switching Checklist - dual technician verification for HV switching.
//!
//! Two technicians independently confirm each step of a de-energise and
//! energise procedure. The crate tracks who completed what and when,
//! reports completion, and only exports a signed record once every step
//! is verified.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

//! Litigation case-file and fine recovery toolkit for a public administration.
//!
//! The heart of the crate is the revenue distribution engine under
//! [`workflows::recovery`]: every validated payment collected against a case
//! is split across fixed organizational pools and the individual agents
//! assigned to the case, following statutory percentages. Period reports fold
//! those distributions into per-agent, per-service, and per-center totals.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

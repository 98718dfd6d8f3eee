//! Review Dashboard - customer feedback client
//!
//! A user-facing review submission form and an admin analytics dashboard,
//! both backed by a remote review API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! SpaceX launch dashboard: joins launches with rocket, launchpad and payload
//! reference data, filters by status and time window, and pages the result
//! into display rows.

pub mod clients;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod utils;

//! Tracking service - records marketing interaction events
//!
//! A tracking event is validated, persisted as one row and then published
//! in-process to the registered handlers (attribution).
//!
//! # Architecture
//! - `domain`: the `TrackingEvent` aggregate and `InteractionType`
//! - `events`: domain events, the synchronous publisher and its handlers
//! - `storage`: SeaORM persistence (SQLite, PostgreSQL, MySQL)
//! - `services`: the application service shared by HTTP and CLI
//! - `api`: HTTP routes, handlers and middleware
//! - `config`: configuration loading
//! - `runtime`: startup, shutdown and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Eco-Tracker: log eco-friendly actions and compare campus progress
//!
//! This crate provides the backend API for the student sustainability
//! tracker: profiles and onboarding, the completed action log, points and
//! CO₂ conversion, eco levels, and university leaderboards.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
}

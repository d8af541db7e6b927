// ABOUTME: Shared test utilities for atlas-intelligence integration tests
// ABOUTME: Provides quiet tracing initialization and catalog-backed engine construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(dead_code, missing_docs)]

use atlas_intelligence::{AdaptiveTrainingEngine, ExerciseCatalog};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Engine over the builtin catalog with default configuration
pub fn default_engine() -> AdaptiveTrainingEngine {
    init_test_logging();
    AdaptiveTrainingEngine::new(Arc::new(ExerciseCatalog::builtin()))
}

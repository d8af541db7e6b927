// ABOUTME: Error taxonomy for the adaptive training decision engine
// ABOUTME: Construction-time config errors plus a single wrapper for unexpected analysis failures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use thiserror::Error;

/// Structurally invalid detector configuration supplied by the host.
///
/// Raised once at construction, never per call. Sparse data is not an
/// error condition anywhere in the engine; detectors degrade to neutral
/// results instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A window or duration parameter is zero or otherwise unusable
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// A threshold is outside its documented range
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// An indicator or scoring weight is outside its documented range
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    /// Cross-field validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Error surface of the composed `analyze` entry point.
///
/// The engine performs no retries and has no fallback behavior of its
/// own; the caller decides whether to log, retry with sanitized input,
/// or show an "insights unavailable" state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine was built with invalid configuration
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] ConfigError),

    /// A sample or program record carried non-finite or out-of-shape values
    #[error("Malformed analysis input: {0}")]
    MalformedInput(String),

    /// Unexpected internal failure, wrapped for the caller
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

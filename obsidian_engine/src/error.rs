//! Error types for the Obsidian engine
//!
//! This module defines the error types used throughout the engine,
//! including native object construction, shader submission, and
//! resource management.

use std::fmt;

/// Result type for Obsidian engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Obsidian engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, lock poisoning, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (render target, pipeline state, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, graphics device, subsystems)
    InitializationFailed(String),

    /// Native render pass or pipeline object creation failed at the driver level
    ConstructionFailure(String),

    /// Submitted shader set is neither a drawable nor a dispatchable pipeline
    CompileIntegrityError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ConstructionFailure(msg) => write!(f, "Construction failure: {}", msg),
            Error::CompileIntegrityError(msg) => write!(f, "Compile integrity error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

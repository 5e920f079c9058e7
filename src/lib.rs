//! Showcue - Playback orchestration for live presentation consoles.
//!
//! Showcue coordinates a main content player against background music and
//! display surfaces owned by an embedding UI. The main features include:
//!
//! - Mutual-exclusion policy between main content and background music
//! - Stepped, cancellable volume fades and audio ducking
//! - Time-triggered events driven by the main player's position
//! - Fullscreen and picture-in-picture reconciliation with user intent
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use showcue::service_manager::Services;
//! # use showcue::services::display::{FullscreenBackend, DisplayError};
//! # struct MyBackend;
//! # #[async_trait::async_trait]
//! # impl FullscreenBackend for MyBackend {
//! #     async fn enter_fullscreen(&self) -> Result<(), DisplayError> { Ok(()) }
//! #     async fn exit_fullscreen(&self) -> Result<(), DisplayError> { Ok(()) }
//! #     async fn enter_pip(&self) -> Result<(), DisplayError> { Ok(()) }
//! #     async fn exit_pip(&self) -> Result<(), DisplayError> { Ok(()) }
//! # }
//!
//! // Create all services with the default configuration
//! let services = Services::with_defaults(Arc::new(MyBackend)).unwrap();
//!
//! // The embedding UI registers its players into services.registry and
//! // reports transport changes to services.orchestrator.
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface for configuration management.
pub mod cli;

/// Reactive services for playback orchestration.
pub mod services;

/// Simple service instance manager.
pub mod service_manager;

/// Tracing/logging initialization.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, ShowcueError};

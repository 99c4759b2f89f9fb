//! Prepare distributed TensorFlow job specs for submission to YARN.
//!
//! A job spec (Yarnfile) is loaded once, annotated per component, given a
//! `TF_CONFIG` topology when distributed, wired up with config-file mounts and
//! environment overrides, then rendered or handed to a [`submit::Submitter`].

pub mod annotate;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod mounts;
pub mod pipeline;
pub mod render;
pub mod spec;
pub mod submit;
pub mod topology;

pub use cli::Cli;
pub use config::RunParams;
pub use error::{Result, TransformError};
pub use pipeline::{Outcome, Stage, execute, transform};

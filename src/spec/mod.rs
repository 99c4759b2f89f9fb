//! Spec layer: the Yarnfile JSON schema and its loading.
//!
//! This module is separate from the transformation steps. It owns:
//! - the typed job spec (components, configuration, file mounts)
//! - reading one spec document from disk
//! - output key-order alignment against the input document

pub mod job;
pub mod load;
pub mod order;

pub use job::{Artifact, Component, Configuration, FileMount, JobSpec, Resource, GPU_RESOURCE};
pub use load::{SpecDocument, load_spec_file};
pub use order::align_key_order;

use crate::error::{Result, TransformError};
use crate::spec::JobSpec;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A parsed job spec plus the raw document it came from.
///
/// The raw document is kept so the output can follow the input's key order.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    pub spec: JobSpec,
    pub raw: Value,
}

impl SpecDocument {
    pub fn from_value(raw: Value) -> serde_json::Result<Self> {
        let spec = serde_json::from_value(raw.clone())?;
        Ok(Self { spec, raw })
    }
}

/// Read and parse a job spec file.
pub fn load_spec_file(path: impl AsRef<Path>) -> Result<SpecDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TransformError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_spec(&text).map_err(|source| TransformError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_spec(text: &str) -> serde_json::Result<SpecDocument> {
    let raw: Value = serde_json::from_str(text)?;
    SpecDocument::from_value(raw)
}

use crate::error::{Result, TransformError};
use crate::spec::{JobSpec, align_key_order};
use serde_json::Value;

/// Render the transformed spec as pretty JSON (2-space indent).
///
/// Keys follow the order of `template`, the document the spec was loaded from.
pub fn render_json(template: &Value, spec: &JobSpec) -> Result<String> {
    let value = serde_json::to_value(spec).map_err(TransformError::Encode)?;
    let aligned = align_key_order(template, value);
    serde_json::to_string_pretty(&aligned).map_err(TransformError::Encode)
}

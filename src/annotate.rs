//! Per-component annotation: setup-script launch prefix, docker artifact and
//! GPU resource request.

use crate::error::{Result, TransformError};
use crate::spec::{Artifact, Component};

use tracing::debug;

/// Default location of the setup script inside the container.
pub const DEFAULT_SETUP_SCRIPT: &str = "resources/presetup-tf.sh";

/// Annotation inputs shared by every component.
#[derive(Debug, Clone, Copy)]
pub struct Annotation<'a> {
    pub docker_image: Option<&'a str>,
    pub gpu: u32,
    pub setup_script: &'a str,
}

/// Annotate every component in place.
///
/// The launch prefix is applied unconditionally, so annotating twice sources
/// the setup script twice. The artifact is overwritten, so the last image wins.
pub fn annotate_components(components: &mut [Component], ann: &Annotation<'_>) -> Result<()> {
    let image = ann.docker_image.filter(|s| !s.is_empty());

    for component in components.iter_mut() {
        component.launch_command = format!(
            ". {} && {} --num-gpus={}",
            ann.setup_script, component.launch_command, ann.gpu
        );
        debug!(component = %component.name, launch_command = %component.launch_command, "new launch command");

        if let Some(image) = image {
            component.artifact = Some(Artifact::docker(image));
            debug!(component = %component.name, image, "using docker image");
        }

        if ann.gpu > 0 {
            component
                .resource
                .get_or_insert_with(Default::default)
                .set_gpu(ann.gpu);
        }
    }

    ensure_artifacts(components)
}

/// Every component must carry a non-empty artifact id.
pub fn ensure_artifacts(components: &[Component]) -> Result<()> {
    for component in components {
        let has_id = component
            .artifact
            .as_ref()
            .is_some_and(|a| !a.id.trim().is_empty());
        if !has_id {
            return Err(TransformError::MissingArtifact {
                component: component.name.clone(),
            });
        }
    }
    Ok(())
}

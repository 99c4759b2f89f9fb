//! Transformation pipeline.
//!
//! Stages run strictly in order, each only after the previous succeeded:
//! Loaded -> Annotated -> (TopologyComputed | TopologySkipped)
//!        -> FilesComposed -> EnvMerged -> Serialized
//!
//! Any error aborts the run and is returned unchanged; nothing is emitted.

use crate::annotate::{Annotation, annotate_components};
use crate::config::RunParams;
use crate::env::merge_env;
use crate::error::Result;
use crate::mounts::{compose_file_mounts, docker_mount_entries};
use crate::render::render_json;
use crate::spec::{SpecDocument, load_spec_file};
use crate::submit::{JobHandle, Submitter};
use crate::topology::{ServiceAddress, build_topology, component_counts};

use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loaded,
    Annotated,
    TopologyComputed,
    TopologySkipped,
    FilesComposed,
    EnvMerged,
    Serialized,
}

/// A spec that went through every transformation stage.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub document: SpecDocument,
    pub stages: Vec<Stage>,
}

impl Transformed {
    /// Serialize the spec, following the input document's key order.
    pub fn render(&mut self) -> Result<String> {
        let text = render_json(&self.document.raw, &self.document.spec)?;
        self.advance(Stage::Serialized);
        Ok(text)
    }

    fn advance(&mut self, stage: Stage) {
        debug!(?stage, "pipeline stage");
        self.stages.push(stage);
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The rendered spec, for printing
    Rendered(String),
    /// The spec was handed to the submitter
    Submitted(JobHandle),
}

/// Apply every transformation to a loaded spec.
pub fn transform(document: SpecDocument, params: &RunParams) -> Result<Transformed> {
    let mut run = Transformed {
        document,
        stages: Vec::new(),
    };
    run.advance(Stage::Loaded);
    let spec = &mut run.document.spec;

    if let Some(name) = params.job_name.as_deref() {
        spec.name = name.to_string();
    }

    // 1) Components: launch prefix, artifact, GPU.
    annotate_components(
        &mut spec.components,
        &Annotation {
            docker_image: params.docker_image.as_deref(),
            gpu: params.gpu,
            setup_script: &params.setup_script,
        },
    )?;
    run.advance(Stage::Annotated);
    let spec = &mut run.document.spec;

    // 2) Topology, only for distributed jobs.
    let topology = if params.distributed {
        let addr = ServiceAddress {
            service: &spec.name,
            user: params.user.as_deref().unwrap_or_default(),
            domain: params.domain.as_deref().unwrap_or_default(),
            port: params.port,
        };
        let counts = component_counts(&spec.components)?;
        Some(build_topology(&addr, &counts)?.encode()?)
    } else {
        None
    };
    let stage = if topology.is_some() {
        Stage::TopologyComputed
    } else {
        Stage::TopologySkipped
    };
    run.advance(stage);
    let spec = &mut run.document.spec;

    // 3) Config files, rebuilt from scratch.
    let files = compose_file_mounts(&params.remote_conf_path, params.kerberos);
    let mounts = docker_mount_entries(&files);
    spec.configuration.files = files;
    run.advance(Stage::FilesComposed);
    let spec = &mut run.document.spec;

    // 4) Env: mounts, TF_CONFIG, user overrides.
    merge_env(
        &mut spec.configuration.env,
        &params.env_overrides,
        &mounts,
        topology.as_deref(),
    );
    run.advance(Stage::EnvMerged);

    Ok(run)
}

/// Load, transform and then either render or submit.
///
/// The submitter, when given, is called exactly once and only after every
/// stage succeeded.
pub fn execute(
    input: impl AsRef<Path>,
    params: &RunParams,
    submitter: Option<&dyn Submitter>,
) -> Result<Outcome> {
    let document = load_spec_file(input.as_ref())?;
    info!(
        job = %document.spec.name,
        components = document.spec.components.len(),
        "loaded job spec"
    );

    let mut run = transform(document, params)?;
    let text = run.render()?;

    match submitter {
        Some(s) => {
            let handle = s.submit(&run.document.spec, params.submit_timeout)?;
            Ok(Outcome::Submitted(handle))
        }
        None => Ok(Outcome::Rendered(text)),
    }
}

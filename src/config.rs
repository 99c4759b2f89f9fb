//! Run configuration
//!
//! Everything the pipeline needs from the outside world, resolved up front by
//! the CLI layer. The core never reads the process environment.

use crate::annotate::DEFAULT_SETUP_SCRIPT;
use crate::env::EnvOverride;
use crate::topology::DEFAULT_PORT;

use std::time::Duration;

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Parameters for one transformation run.
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Remote directory holding `configs/` (core-site.xml, hdfs-site.xml, ...)
    pub remote_conf_path: String,

    /// Docker image applied to every component, if set
    pub docker_image: Option<String>,

    /// Overrides applied last to `configuration.env`
    pub env_overrides: Vec<EnvOverride>,

    /// Replaces the spec's `name`
    pub job_name: Option<String>,

    /// GPUs per container
    pub gpu: u32,

    /// User in generated host names, only consulted in distributed mode
    pub user: Option<String>,

    /// Registry DNS domain, only consulted in distributed mode
    pub domain: Option<String>,

    /// Generate `TF_CONFIG` from the master/worker/ps components
    pub distributed: bool,

    /// Also mount `krb5.conf`
    pub kerberos: bool,

    /// Script sourced before every launch command
    pub setup_script: String,

    /// Port used in generated `TF_CONFIG` host names
    pub port: u16,

    pub submit_timeout: Duration,
}

impl RunParams {
    /// Creates parameters with defaults for everything but the remote path.
    pub fn new(remote_conf_path: impl Into<String>) -> Self {
        Self {
            remote_conf_path: remote_conf_path.into(),
            docker_image: None,
            env_overrides: Vec::new(),
            job_name: None,
            gpu: 0,
            user: None,
            domain: None,
            distributed: false,
            kerberos: false,
            setup_script: DEFAULT_SETUP_SCRIPT.to_string(),
            port: DEFAULT_PORT,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

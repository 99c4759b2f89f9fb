//! Command-line surface.

use crate::annotate::DEFAULT_SETUP_SCRIPT;
use crate::config::RunParams;
use crate::env::parse_env_overrides;
use crate::error::Result;
use crate::topology::{ComponentCounts, DEFAULT_PORT, MASTER, PS, ServiceAddress, WORKER, build_topology};

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "submit-tf-job")]
#[command(about = "Prepare a TensorFlow job spec for YARN", long_about = None)]
pub struct Cli {
    /// Remote configuration path holding configs/ for the job
    #[arg(long, alias = "remote_conf_path")]
    pub remote_conf_path: String,

    /// Yarnfile specification for the job
    #[arg(long, alias = "input_spec")]
    pub input_spec: PathBuf,

    /// Docker image for every component
    #[arg(long, alias = "docker_image")]
    pub docker_image: Option<String>,

    /// Environment variables in key=value format, comma separated
    #[arg(long)]
    pub env: Option<String>,

    /// Submit the job instead of printing the generated spec
    #[arg(long)]
    pub submit: bool,

    /// Job name, overrides the one in the input spec
    #[arg(long, alias = "job_name")]
    pub job_name: Option<String>,

    /// Number of GPUs per component
    #[arg(long, default_value_t = 0)]
    pub gpu: u32,

    /// User name if different from $USER (e.g. kinit user)
    #[arg(long, env = "USER")]
    pub user: Option<String>,

    /// Cluster domain name, same as hadoop.registry.dns.domain-name;
    /// required for distributed jobs
    #[arg(long)]
    pub domain: Option<String>,

    /// Distributed TensorFlow; worker/ps/master must be in the spec
    #[arg(long)]
    pub distributed: bool,

    /// Kerberos-enabled cluster, mounts krb5.conf
    #[arg(long)]
    pub kerberos: bool,

    /// Script sourced before each launch command
    #[arg(long, default_value = DEFAULT_SETUP_SCRIPT)]
    pub setup_script: String,

    /// Port used in TF_CONFIG host names
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Timeout for the submission call
    #[arg(long, default_value_t = 60)]
    pub submit_timeout_secs: u64,

    /// Print debug information
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the run parameters, parsing `--env` up front.
    pub fn run_params(&self) -> Result<RunParams> {
        let env_overrides = match &self.env {
            Some(raw) => parse_env_overrides(raw)?,
            None => Vec::new(),
        };

        Ok(RunParams {
            remote_conf_path: self.remote_conf_path.clone(),
            docker_image: self.docker_image.clone(),
            env_overrides,
            job_name: self.job_name.clone(),
            gpu: self.gpu,
            user: self.user.clone(),
            domain: self.domain.clone(),
            distributed: self.distributed,
            kerberos: self.kerberos,
            setup_script: self.setup_script.clone(),
            port: self.port,
            submit_timeout: Duration::from_secs(self.submit_timeout_secs),
        })
    }
}

/// Standalone `TF_CONFIG` generator, for specs assembled by hand.
#[derive(Debug, Parser)]
#[command(name = "generate-tf-config")]
#[command(about = "Print a TF_CONFIG env entry for a distributed TensorFlow service", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct GenerateTfConfigCli {
    /// User name the service runs as
    pub user: String,

    /// Cluster domain name, same as hadoop.registry.dns.domain-name
    pub domain: String,

    /// Service (job) name
    pub service: String,

    /// Number of workers, excluding the master
    pub num_workers: i64,

    /// Number of parameter servers
    pub num_ps: i64,

    /// Port used in host names
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl GenerateTfConfigCli {
    /// `"TF_CONFIG": "<escaped descriptor>"`, ready to paste into a spec's env.
    pub fn env_entry(&self) -> Result<String> {
        let addr = ServiceAddress {
            service: &self.service,
            user: &self.user,
            domain: &self.domain,
            port: self.port,
        };
        let counts: ComponentCounts = [(MASTER, 1), (WORKER, self.num_workers), (PS, self.num_ps)]
            .into_iter()
            .map(|(role, n)| (role.to_string(), n))
            .collect();

        build_topology(&addr, &counts)?.env_entry()
    }
}

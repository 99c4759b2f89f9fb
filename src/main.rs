use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use yarn_tf_submit::submit::{PlaceholderSubmitter, Submitter};
use yarn_tf_submit::{Cli, Outcome, execute};

pub type Result<T> = anyhow::Result<T>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the spec.
    let default_filter = if cli.verbose {
        "yarn_tf_submit=debug"
    } else {
        "yarn_tf_submit=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 1) Resolve parameters (env overrides are validated here).
    let params = cli.run_params()?;
    tracing::debug!(
        remote_conf_path = %params.remote_conf_path,
        input_spec = %cli.input_spec.display(),
        submit = cli.submit,
        user = ?params.user,
        gpu = params.gpu,
        "run parameters"
    );

    // 2) Transform, then print or submit.
    let submitter = PlaceholderSubmitter;
    let submitter: Option<&dyn Submitter> = cli.submit.then_some(&submitter as &dyn Submitter);

    let outcome = execute(&cli.input_spec, &params, submitter)
        .with_context(|| format!("failed to prepare job spec {}", cli.input_spec.display()))?;

    match outcome {
        Outcome::Rendered(text) => println!("{}", text),
        Outcome::Submitted(_) => println!("Submit job to YARN."),
    }

    Ok(())
}

use clap::Parser;
use yarn_tf_submit::cli::GenerateTfConfigCli;

fn main() -> anyhow::Result<()> {
    let cli = GenerateTfConfigCli::parse();
    println!("{}", cli.env_entry()?);
    Ok(())
}

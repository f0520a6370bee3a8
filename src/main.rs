use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use tfprune::cli::Cli;
use tfprune::error::TfpruneError;
use tfprune::removal::{RemovalConfig, RemovalExecutor};
use tfprune::terraform::TerraformCli;
use tfprune::{picker, resource, terraform};

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => Ok(()),
        Err(err @ TfpruneError::StateUnavailable(_)) => {
            tracing::debug!(error = ?err, "aborting");
            println!("No terraform state found");
            std::process::exit(1);
        }
        Err(err @ TfpruneError::NoCandidates) => {
            tracing::debug!(error = ?err, "aborting");
            println!("No resources available for removal were found");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn run(cli: Cli) -> Result<(), TfpruneError> {
    let working_dir = match cli.chdir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let terraform_cli = TerraformCli::new(&cli.terraform_bin, &working_dir);

    let tracked = terraform_cli
        .state_list()
        .map_err(TfpruneError::StateUnavailable)?;
    tracing::debug!(count = tracked.len(), "state entries listed");

    let declared = terraform::config::scan_dir(&working_dir)?;
    tracing::debug!(count = declared.len(), "resource blocks declared");

    let candidates = resource::candidates(&tracked, &declared);
    if candidates.is_empty() {
        return Err(TfpruneError::NoCandidates);
    }
    tracing::info!(count = candidates.len(), "candidates for removal");

    let selected = picker::pick(&candidates)?;
    tracing::info!(count = selected.len(), "resources selected");

    let executor = RemovalExecutor::new(&terraform_cli, RemovalConfig { force: cli.force });
    executor.run(&selected, std::io::stdin().lock(), std::io::stdout())?;
    Ok(())
}

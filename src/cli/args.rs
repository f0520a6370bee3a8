use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Do not prompt for confirmation when removing a resource from the state
    #[arg(long)]
    pub force: bool,

    /// Directory holding the Terraform configuration (defaults to the
    /// current directory)
    #[arg(long, value_name = "DIR")]
    pub chdir: Option<PathBuf>,

    /// Terraform binary to invoke
    #[arg(
        long,
        env = "TFPRUNE_TERRAFORM_BIN",
        default_value = "terraform",
        value_name = "BIN"
    )]
    pub terraform_bin: String,
}

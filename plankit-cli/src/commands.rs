use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse plan text into an ordered list of steps.
    Parse {
        #[command(flatten)]
        args: ParseArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Pick the backend a function's configurations resolve to.
    Select {
        #[command(flatten)]
        args: SelectArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "plankit", version, about = "Parse model-written plans and resolve backends")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = run_command(cli.command);
    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_command(command: Command) -> i32 {
    match command {
        Command::Parse { args, output } => cmd::parse::parse_cmd(&args, &output),
        Command::Select { args, output } => cmd::select::select_cmd(&args, &output),
    }
}

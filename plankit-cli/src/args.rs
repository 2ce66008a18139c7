use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ParseArgs {
    /// Plan text produced by a model.
    pub path: PathBuf,
    /// JSON or YAML list of callables the plan may reference.
    #[arg(long)]
    pub functions: PathBuf,
    /// Goal carried by the plan. Defaults to the plan's goal element.
    #[arg(long, default_value = "")]
    pub goal: String,
    /// Keep steps whose callable is unknown as placeholders.
    #[arg(long)]
    pub allow_missing: bool,
    /// JSON or YAML parser configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SelectArgs {
    /// JSON or YAML list of registered backends.
    #[arg(long)]
    pub services: PathBuf,
    /// JSON or YAML list of ranked backend configurations.
    #[arg(long, conflicts_with = "function")]
    pub settings: Option<PathBuf>,
    /// Use the configurations declared by this callable (`namespace.name`).
    #[arg(long, requires = "functions")]
    pub function: Option<String>,
    /// Function manifest used with `--function`.
    #[arg(long)]
    pub functions: Option<PathBuf>,
}

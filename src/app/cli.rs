use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Merge project files and generate directory structure"
)]
pub struct Cli {
    /// Project directory [default: .]
    #[arg(short, long)]
    pub directory: Option<String>,

    /// Output filename [default: project.txt]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Comma-separated list of file extensions to include; items are trimmed
    /// and blank items ignored [default: .py,.md,.env_template,.bat,.sh]
    #[arg(short, long)]
    pub extensions: Option<String>,

    /// Comma-separated list of directories to ignore
    /// [default: .git,.venv,venv,node_modules,__pycache__,build,dist]
    #[arg(short, long = "ignore_dirs", alias = "ignore-dirs")]
    pub ignore_dirs: Option<String>,

    /// Use a named preset from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Silence all logging
    #[arg(short, long)]
    pub quiet: bool,
}

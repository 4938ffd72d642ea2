//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::fetcher::source::DEFAULT_GO_PROGRAM;
use crate::installer::InstallOptions;

/// Cartage - source dependency manager
///
/// Pin the source dependencies of a Go workspace to exact revisions.
#[derive(Parser, Debug)]
#[command(
    name = "cartage",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Source dependency manager for Go workspaces",
    long_about = "Cartage fetches the dependencies listed in a Cartridge file into the \
                  workspace, pins each working copy (git, hg or bzr) to the requested \
                  revision, and records the exact revisions in Cartridge.lock.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  cartage\n    \
                  cartage install --recursive\n    \
                  cartage check\n\n\
                  \x1b[1m\x1b[32mCartridge format:\x1b[0m\n    \
                  <import path>  <version or *>  [comma,separated,tags]"
)]
pub struct Cli {
    /// Workspace root list; dependencies are installed under its first entry
    #[arg(long, env = "GOPATH", global = true, hide_env_values = true)]
    pub gopath: Option<String>,

    /// Directory containing the Cartridge file
    #[arg(long, short = 'd', global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Program used to fetch sources
    #[arg(long, env = "CARTAGE_GO", global = true, default_value = DEFAULT_GO_PROGRAM)]
    pub go: String,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Defaults to `install` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and pin dependencies, then write Cartridge.lock
    Install(InstallArgs),

    /// Report dependencies that are dirty or not at their pinned version
    Check(CheckArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Install from Cartridge (and Cartridge.lock if present):\n    cartage install\n\n\
                   Also install the dependencies of dependencies:\n    cartage install -r\n\n\
                   Lock everything fetched, nested dependencies included:\n    cartage install -r -a\n\n\
                   Let top-level versions win over nested Cartridges:\n    cartage install -r -t\n\n\
                   Skip dependencies tagged 'dev':\n    cartage install --exclude dev")]
pub struct InstallArgs {
    /// Install dependencies of dependencies
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Write every fetched dependency to Cartridge.lock, not just the top level
    #[arg(long, short = 'a')]
    pub aggregate: bool,

    /// Top-level dependencies override nested Cartridge entries for the same path
    #[arg(long, short = 't')]
    pub trickle_down: bool,

    /// Skip dependencies carrying this tag (repeatable)
    #[arg(long, value_name = "TAG")]
    pub exclude: Vec<String>,
}

impl From<InstallArgs> for InstallOptions {
    fn from(args: InstallArgs) -> Self {
        Self {
            recursive: args.recursive,
            aggregate: args.aggregate,
            trickle_down: args.trickle_down,
            exclude: args.exclude,
        }
    }
}

/// Arguments for the check command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Check every dependency, nested ones included:\n    cartage check\n\n\
                  Ignore dependencies tagged 'dev':\n    cartage check --exclude dev")]
pub struct CheckArgs {
    /// Skip dependencies carrying this tag (repeatable)
    #[arg(long, value_name = "TAG")]
    pub exclude: Vec<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    cartage completions --shell bash > ~/.bash_completion.d/cartage\n\n\
                  Generate zsh completions:\n    cartage completions --shell zsh > ~/.zfunc/_cartage\n\n\
                  Generate fish completions:\n    cartage completions --shell fish > ~/.config/fish/completions/cartage.fish\n\n\
                  Generate PowerShell completions:\n    cartage completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// a register allocator for register-based bytecode in SSA form.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
#[command(propagate_version = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,

    /// Log more details. Can be repeated.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Arguments {
    pub fn options(&self) -> &Options {
        self.command.options()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Allocate registers for every method in a listing.
    #[command(visible_alias = "a")]
    Alloc(Options),

    /// Only parse a listing and report any errors in it.
    #[command(visible_alias = "c")]
    Check(Options),
}

impl Command {
    pub fn options(&self) -> &Options {
        match self {
            Self::Alloc(opts) => opts,
            Self::Check(opts) => opts,
        }
    }

    pub fn alloc(&self) -> bool {
        matches!(self, Self::Alloc(_))
    }
}

#[derive(Debug, Args)]
pub struct Options {
    /// Keep the parameters in the lowest registers.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_params_high: bool,

    /// The line width of the printed listings.
    #[arg(short, long, default_value_t = 80)]
    pub width: usize,

    #[arg(required = true)]
    pub path: PathBuf,
}

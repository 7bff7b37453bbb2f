//! Command-line interface

use crate::config::{SessionConfig, ShellKind};
use crate::source::DEFAULT_RADIUS;
use clap::Parser;
use dialoguer::Confirm;
use std::path::PathBuf;
use tracing::debug;

/// Browse the stack frames captured in a dump file
#[derive(Debug, Parser)]
#[command(name = "framedump", version, about)]
pub struct Cli {
    /// Dump file to load
    #[arg(short = 'l', long = "load", value_name = "FILE")]
    pub load: PathBuf,

    /// Do not read source files from disk (useful when they have changed)
    #[arg(short = 'S', long)]
    pub no_sources: bool,

    /// Assume yes to all questions
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Use the line console instead of the full-screen UI
    #[arg(long)]
    pub no_tui: bool,

    /// Frame to start on
    #[arg(short = 'f', long, value_name = "N", default_value_t = 0)]
    pub frame: usize,

    /// Lines of source shown on each side of the current line
    #[arg(short = 'r', long, value_name = "N", default_value_t = DEFAULT_RADIUS)]
    pub radius: usize,

    /// Log filter, e.g. `debug` or `framedump=trace`
    #[arg(long, env = "FRAMEDUMP_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        self.session_config_with(ShellKind::select(self.no_tui))
    }

    fn session_config_with(&self, shell: ShellKind) -> SessionConfig {
        SessionConfig {
            no_sources: self.no_sources,
            start_frame: self.frame,
            source_radius: self.radius,
            shell,
        }
    }
}

/// Ask before opening a dump; interrupts and terminal errors count as "no"
pub fn confirm_load() -> bool {
    let answer = Confirm::new()
        .with_prompt(
            "Dump files can contain sensitive program state. Do you still want to proceed?",
        )
        .default(false)
        .interact_opt();

    match answer {
        Ok(Some(answer)) => answer,
        Ok(None) => false,
        Err(e) => {
            debug!(error = %e, "confirmation aborted");
            false
        }
    }
}

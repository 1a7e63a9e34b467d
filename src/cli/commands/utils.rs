//! Shared utilities for CLI commands

use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::{Config, Directory, Workspace};

/// An open directory together with the configuration it was found through
pub struct Session {
    pub directory: Directory,
    pub config: Config,
}

/// Open the directory database selected by flags, config, or the workspace
///
/// Precedence: `--database`, then `PHONEDIR_DATABASE` and config files, then
/// `.phonedir/directory.db` of the discovered workspace.
pub fn open_session(global: &GlobalOpts) -> Result<Session> {
    let workspace = Workspace::discover().ok();
    let config = Config::load(workspace.as_ref());

    let path = match global.database.clone() {
        Some(path) => path,
        None => config.database_path(workspace.as_ref()).ok_or_else(|| {
            miette::miette!(
                help = "run 'phonedir init' or pass --database PATH",
                "no phone directory found"
            )
        })?,
    };

    let directory = Directory::open(&path)?;
    Ok(Session { directory, config })
}

/// Ask for confirmation unless `assume_yes` is set
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}

/// Print a success line unless quiet
pub fn report_success(global: &GlobalOpts, message: impl std::fmt::Display) {
    if !global.quiet {
        println!("{} {}", style("✓").green(), message);
    }
}

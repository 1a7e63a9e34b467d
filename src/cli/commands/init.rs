//! `phonedir init` command - create a workspace and its database

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::{Directory, Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite the workspace config even if .phonedir/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let workspace = if args.force {
        Workspace::init_force(&path)
    } else {
        Workspace::init(&path)
    };

    match workspace {
        Ok(workspace) => {
            let database = workspace.database_path();
            Directory::open(&database)?.close()?;

            println!(
                "{} Initialized phone directory at {}",
                style("✓").green(),
                style(workspace.root().display()).cyan()
            );
            println!("  database: {}", style(database.display()).dim());
            println!();
            println!("Next steps:");
            println!(
                "  {} Add your first record",
                style("phonedir add --surname ... --telephone ...").yellow()
            );
            println!("  {} List all records", style("phonedir list").yellow());
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(path)) => {
            println!(
                "{} Phone directory already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("phonedir init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

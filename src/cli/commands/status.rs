//! `phonedir status` command - database location and row counts

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::open_session;
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global)?;
    let stats = session.directory.statistics()?;
    let path = session
        .directory
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());

    match resolve_format(global, &session.config, OutputFormat::Tsv) {
        OutputFormat::Json => {
            let status = serde_json::json!({
                "database": path,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&status).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            let status = serde_json::json!({
                "database": path,
                "stats": stats,
            });
            print!("{}", serde_yml::to_string(&status).into_diagnostic()?);
        }
        _ => {
            println!("{}", style("Phone Directory Status").bold().underlined());
            println!();
            println!("  Database:     {}", style(&path).cyan());
            println!("  Size:         {} KB", stats.db_size_bytes / 1024);
            println!();
            println!("  Records:      {}", style(stats.records).cyan());
            println!("  Listed:       {}", style(stats.listed).cyan());
            let hidden = stats.records.saturating_sub(stats.listed);
            if hidden > 0 {
                println!(
                    "  {} {} record(s) reference a deleted name component",
                    style("!").yellow(),
                    hidden
                );
            }
            println!("  Surnames:     {}", stats.surnames);
            println!("  Names:        {}", stats.names);
            println!("  Patronymics:  {}", stats.patronymics);
        }
    }

    Ok(())
}

//! Lookup table commands - `phonedir surnames|names|patronymics ...`

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{confirm, open_session, report_success};
use crate::cli::helpers::resolve_format;
use crate::cli::table::{TableFormatter, LOOKUP_COLUMNS};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{DirectoryError, LookupTable};

#[derive(Subcommand, Debug)]
pub enum LookupCommands {
    /// List every value with its uid
    List,

    /// Add a value, or print the uid of the existing one
    Add {
        /// Value to add
        value: String,
    },

    /// Change the text of an existing value
    Rename {
        /// Value uid
        uid: i64,

        /// New text
        value: String,
    },

    /// Delete a value; records using it are hidden from listings
    Delete {
        /// Value uid
        uid: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

pub fn run(table: LookupTable, cmd: LookupCommands, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    let directory = &mut session.directory;

    match cmd {
        LookupCommands::List => {
            let entries = directory.list_lookup(table);
            let format = resolve_format(global, &session.config, OutputFormat::Tsv);
            TableFormatter::new(LOOKUP_COLUMNS, table.field_label())
                .with_summary(!global.quiet)
                .output(&entries, format)?;
        }
        LookupCommands::Add { value } => {
            let existing = directory.find_lookup(table, value.trim())?;
            let uid = match existing {
                Some(uid) => uid,
                None => directory.add_lookup(table, &value)?,
            };
            if global.quiet {
                println!("{}", uid);
            } else if existing.is_some() {
                println!(
                    "{} '{}' already exists in {} as {}",
                    style("!").yellow(),
                    value.trim(),
                    table,
                    style(uid).cyan()
                );
            } else {
                report_success(
                    global,
                    format!("Added '{}' to {} as {}", value.trim(), table, style(uid).cyan()),
                );
            }
        }
        LookupCommands::Rename { uid, value } => {
            directory.rename_lookup(table, uid, &value)?;
            report_success(
                global,
                format!("Renamed {} {} to '{}'", table.field_label(), style(uid).cyan(), value.trim()),
            );
        }
        LookupCommands::Delete { uid, yes } => {
            if !directory.list_lookup(table).iter().any(|e| e.uid == uid) {
                return Err(DirectoryError::LookupNotFound { table, uid }.into());
            }
            let usage = directory.lookup_usage(table, uid)?;
            if usage > 0 && !global.quiet {
                println!(
                    "{} {} record(s) use this {} and will be hidden from listings",
                    style("!").yellow(),
                    style(usage).cyan(),
                    table.field_label()
                );
            }
            if !confirm(&format!("Delete {} {}?", table.field_label(), uid), yes)? {
                println!("{} Cancelled", style("!").yellow());
                return Ok(());
            }
            directory.delete_lookup(table, uid)?;
            report_success(
                global,
                format!("Deleted {} {}", table.field_label(), style(uid).cyan()),
            );
        }
    }

    Ok(())
}

//! Record commands - `phonedir add`, `update`, `delete` and `show`

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{confirm, open_session, report_success};
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{DirectoryError, DirectoryRow, RecordFields};

/// The seven editable fields of a record
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub surname: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub patronymic: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub house: Option<String>,

    #[arg(long, short = 't')]
    pub telephone: Option<String>,
}

impl FieldArgs {
    /// Missing flags become empty fields and fail validation in the store
    pub fn to_fields(&self) -> RecordFields {
        let get = |v: &Option<String>| v.clone().unwrap_or_default();
        RecordFields {
            surname: get(&self.surname),
            name: get(&self.name),
            patronymic: get(&self.patronymic),
            city: get(&self.city),
            street: get(&self.street),
            house: get(&self.house),
            telephone: get(&self.telephone),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Record uid
    pub uid: i64,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Record uid
    pub uid: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record uid
    pub uid: i64,
}

pub fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    let uid = session.directory.add_record(&args.fields.to_fields())?;

    if global.quiet {
        println!("{}", uid);
    } else {
        report_success(global, format!("Added record {}", style(uid).cyan()));
    }
    Ok(())
}

pub fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;
    session
        .directory
        .update_record(args.uid, &args.fields.to_fields())?;

    report_success(global, format!("Updated record {}", style(args.uid).cyan()));
    Ok(())
}

pub fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global)?;

    if session.directory.get_stored_record(args.uid)?.is_none() {
        return Err(DirectoryError::RecordNotFound(args.uid).into());
    }

    let label = match session.directory.get_record(args.uid)? {
        Some(row) => format!("{} {} {} ({})", row.surname, row.name, row.patronymic, row.telephone),
        None => format!("record {}", args.uid),
    };
    if !confirm(&format!("Delete {}?", label), args.yes)? {
        println!("{} Cancelled", style("!").yellow());
        return Ok(());
    }

    session.directory.delete_record(args.uid)?;
    report_success(global, format!("Deleted record {}", style(args.uid).cyan()));
    Ok(())
}

pub fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global)?;

    let row = match session.directory.get_record(args.uid)? {
        Some(row) => row,
        None => {
            if session.directory.get_stored_record(args.uid)?.is_some() {
                return Err(miette::miette!(
                    code = "phonedir::hidden",
                    help = "one of its surname, name or patronymic was deleted; run 'phonedir update' to set them again",
                    "record {} is hidden from listings",
                    args.uid
                ));
            }
            return Err(DirectoryError::RecordNotFound(args.uid).into());
        }
    };

    match resolve_format(global, &session.config, OutputFormat::Yaml) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&row).into_diagnostic()?);
        }
        OutputFormat::Id => println!("{}", row.uid),
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&row).into_diagnostic()?),
        _ => print_fields(&row),
    }
    Ok(())
}

fn print_fields(row: &DirectoryRow) {
    let fields = [
        ("ID", row.uid.to_string()),
        ("Surname", row.surname.clone()),
        ("Name", row.name.clone()),
        ("Patronymic", row.patronymic.clone()),
        ("City", row.city.clone()),
        ("Street", row.street.clone()),
        ("House", row.house.clone()),
        ("Telephone", row.telephone.clone()),
    ];
    for (label, value) in fields {
        println!("{:<12}{}", style(format!("{}:", label)).bold(), value);
    }
}

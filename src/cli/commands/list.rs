//! `phonedir list` command - searched and filtered directory listings

use clap::ValueEnum;
use miette::Result;

use crate::cli::commands::utils::open_session;
use crate::cli::helpers::resolve_format;
use crate::cli::table::{TableFormatter, RECORD_COLUMNS};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{DirectoryRow, FilterColumn, FilterSpec};

/// Columns a listing can be sorted by
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    Id,
    Surname,
    Name,
    Patronymic,
    City,
    Street,
    House,
    Telephone,
}

impl SortColumn {
    fn sort(&self, rows: &mut [DirectoryRow]) {
        match self {
            SortColumn::Id => rows.sort_by_key(|r| r.uid),
            SortColumn::Surname => rows.sort_by(|a, b| a.surname.cmp(&b.surname)),
            SortColumn::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
            SortColumn::Patronymic => rows.sort_by(|a, b| a.patronymic.cmp(&b.patronymic)),
            SortColumn::City => rows.sort_by(|a, b| a.city.cmp(&b.city)),
            SortColumn::Street => rows.sort_by(|a, b| a.street.cmp(&b.street)),
            SortColumn::House => rows.sort_by(|a, b| a.house.cmp(&b.house)),
            SortColumn::Telephone => rows.sort_by(|a, b| a.telephone.cmp(&b.telephone)),
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Match this text in any of surname, name, patronymic, city, street, house or telephone
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter by record uid (substring of its decimal text)
    #[arg(long)]
    pub id: Option<String>,

    /// Filter by surname
    #[arg(long)]
    pub surname: Option<String>,

    /// Filter by name
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by patronymic
    #[arg(long)]
    pub patronymic: Option<String>,

    /// Filter by city
    #[arg(long)]
    pub city: Option<String>,

    /// Filter by street
    #[arg(long)]
    pub street: Option<String>,

    /// Filter by house
    #[arg(long)]
    pub house: Option<String>,

    /// Filter by telephone
    #[arg(long)]
    pub telephone: Option<String>,

    /// Column filter by label, e.g. --filter City=York (repeatable)
    #[arg(long = "filter", value_name = "LABEL=VALUE")]
    pub filters: Vec<String>,

    /// Sort by column
    #[arg(long, default_value = "id")]
    pub sort: SortColumn,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Show at most this many rows
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Print only the number of matching records
    #[arg(long)]
    pub count: bool,
}

impl ListArgs {
    /// Collect the search term and column filters
    ///
    /// Named flags are applied first; `--filter LABEL=VALUE` entries override
    /// them for the same column.
    pub fn filter_spec(&self) -> Result<FilterSpec> {
        let mut spec = FilterSpec::new().with_search(self.search.clone().unwrap_or_default());

        let named = [
            (FilterColumn::Id, &self.id),
            (FilterColumn::Surname, &self.surname),
            (FilterColumn::Name, &self.name),
            (FilterColumn::Patronymic, &self.patronymic),
            (FilterColumn::City, &self.city),
            (FilterColumn::Street, &self.street),
            (FilterColumn::House, &self.house),
            (FilterColumn::Telephone, &self.telephone),
        ];
        for (column, value) in named {
            if let Some(value) = value {
                spec = spec.with_column(column, value.clone());
            }
        }

        for entry in &self.filters {
            let (label, value) = entry.split_once('=').ok_or_else(|| {
                miette::miette!(
                    help = "use LABEL=VALUE, e.g. --filter City=York",
                    "invalid filter '{}'",
                    entry
                )
            })?;
            spec.set_label(label, value)?;
        }

        Ok(spec)
    }
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global)?;
    let spec = args.filter_spec()?;

    let mut rows = if spec.is_empty() {
        session.directory.list_all()
    } else {
        session.directory.search(&spec)?
    };

    args.sort.sort(&mut rows);
    if args.reverse {
        rows.reverse();
    }
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }

    let format = resolve_format(global, &session.config, OutputFormat::Tsv);
    TableFormatter::new(RECORD_COLUMNS, "record")
        .with_summary(!global.quiet)
        .output(&rows, format)
}

//! Table rendering for list output
//!
//! Every listing goes through [`TableFormatter`], which renders a slice of rows
//! in any [`OutputFormat`]. JSON and YAML serialize the rows directly; the
//! tabular formats use [`TableRow::cells`] in [`Column`] order.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::core::{DirectoryRow, LookupEntry};

/// A displayable column
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Key used as the CSV header
    pub key: &'static str,
    /// Header shown in tsv and markdown output
    pub header: &'static str,
    /// Cells wider than this are truncated in tsv output
    pub max_width: usize,
}

impl Column {
    pub const fn new(key: &'static str, header: &'static str, max_width: usize) -> Self {
        Self {
            key,
            header,
            max_width,
        }
    }
}

/// Columns of a directory listing, in display order
pub const RECORD_COLUMNS: &[Column] = &[
    Column::new("uid", "ID", 8),
    Column::new("surname", "SURNAME", 24),
    Column::new("name", "NAME", 20),
    Column::new("patronymic", "PATRONYMIC", 24),
    Column::new("city", "CITY", 20),
    Column::new("street", "STREET", 28),
    Column::new("house", "HOUSE", 8),
    Column::new("telephone", "TELEPHONE", 20),
];

/// Columns of a lookup table listing
pub const LOOKUP_COLUMNS: &[Column] = &[
    Column::new("uid", "ID", 8),
    Column::new("value", "VALUE", 40),
];

/// A row that can be shown in a table
pub trait TableRow {
    fn uid(&self) -> i64;

    /// Cell text, one entry per column
    fn cells(&self) -> Vec<String>;
}

impl TableRow for DirectoryRow {
    fn uid(&self) -> i64 {
        self.uid
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.uid.to_string(),
            self.surname.clone(),
            self.name.clone(),
            self.patronymic.clone(),
            self.city.clone(),
            self.street.clone(),
            self.house.clone(),
            self.telephone.clone(),
        ]
    }
}

impl TableRow for LookupEntry {
    fn uid(&self) -> i64 {
        self.uid
    }

    fn cells(&self) -> Vec<String> {
        vec![self.uid.to_string(), self.value.clone()]
    }
}

/// Renders rows in the requested output format
pub struct TableFormatter<'a> {
    columns: &'a [Column],
    entity_name: &'a str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [Column], entity_name: &'a str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Toggle the trailing "N found" line of tsv output
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    /// Render `rows`; `Auto` renders as tsv
    pub fn render<T: TableRow + Serialize>(&self, rows: &[T], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(rows)
                .map(|s| s + "\n")
                .into_diagnostic(),
            OutputFormat::Yaml => serde_yml::to_string(rows).into_diagnostic(),
            OutputFormat::Csv => self.render_csv(rows),
            OutputFormat::Md => Ok(self.render_md(rows)),
            OutputFormat::Id => Ok(rows.iter().map(|r| format!("{}\n", r.uid())).collect()),
            OutputFormat::Auto | OutputFormat::Tsv => Ok(self.render_tsv(rows)),
        }
    }

    /// Render and print to stdout
    pub fn output<T: TableRow + Serialize>(&self, rows: &[T], format: OutputFormat) -> Result<()> {
        print!("{}", self.render(rows, format)?);
        Ok(())
    }

    fn render_tsv<T: TableRow>(&self, rows: &[T]) -> String {
        if rows.is_empty() {
            return if self.show_summary {
                format!("No {}s found.\n", self.entity_name)
            } else {
                String::new()
            };
        }

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.cells()
                    .iter()
                    .zip(self.columns)
                    .map(|(value, col)| truncate_str(value, col.max_width))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                cells
                    .iter()
                    .map(|row| row.get(i).map_or(0, |c| console::measure_text_width(c)))
                    .max()
                    .unwrap_or(0)
                    .max(col.header.len())
            })
            .collect();

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in &cells {
            let parts: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (value, w))| {
                    let padding = w.saturating_sub(console::measure_text_width(value));
                    if i == 0 {
                        format!("{}{}", style(value).cyan(), " ".repeat(padding))
                    } else {
                        format!("{}{}", value, " ".repeat(padding))
                    }
                })
                .collect();
            out.push_str(parts.join(" ").trim_end());
            out.push('\n');
        }

        if self.show_summary {
            out.push('\n');
            out.push_str(&format!(
                "{} {}(s) found.\n",
                style(rows.len()).cyan(),
                self.entity_name
            ));
        }

        out
    }

    fn render_csv<T: TableRow>(&self, rows: &[T]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.columns.iter().map(|c| c.key))
            .into_diagnostic()?;
        for row in rows {
            writer.write_record(row.cells()).into_diagnostic()?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| miette::miette!("failed to write csv: {}", e.error()))?;
        String::from_utf8(bytes).into_diagnostic()
    }

    fn render_md<T: TableRow>(&self, rows: &[T]) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().map(|c| c.header));
        for row in rows {
            builder.push_record(row.cells());
        }
        format!("{}\n", builder.build().with(Style::markdown()))
    }
}

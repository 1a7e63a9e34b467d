//! Filter query builder for directory listings
//!
//! Turns a [`FilterSpec`] (free-text search term plus per-column filters)
//! into a parameterized SELECT over the directory joined with its three
//! lookup tables.
//!
//! Column expressions come only from [`FilterColumn`]; user text only ever
//! reaches the query as a bound parameter. Every match is a case-insensitive
//! literal substring test:
//!
//! ```text
//! casefold(<column>) LIKE casefold(?) ESCAPE '\'
//! ```
//!
//! `casefold` is registered by the storage layer (full Unicode lowercasing).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::error::DirectoryError;

/// Joined read over the directory, one row per record whose three name
/// components all still exist
pub const BASE_QUERY: &str = "SELECT d.uid, s.value, n.value, p.value, d.city, d.street, d.house, d.telephone \
     FROM directory d \
     JOIN surnames s ON d.surname = s.uid \
     JOIN names n ON d.name = n.uid \
     JOIN patronymics p ON d.patronymic = p.uid";

/// A filterable column of the joined directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Id,
    Surname,
    Name,
    Patronymic,
    City,
    Street,
    House,
    Telephone,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 8] = [
        FilterColumn::Id,
        FilterColumn::Surname,
        FilterColumn::Name,
        FilterColumn::Patronymic,
        FilterColumn::City,
        FilterColumn::Street,
        FilterColumn::House,
        FilterColumn::Telephone,
    ];

    /// Columns the free-text search is matched against
    pub const SEARCHABLE: [FilterColumn; 7] = [
        FilterColumn::Surname,
        FilterColumn::Name,
        FilterColumn::Patronymic,
        FilterColumn::City,
        FilterColumn::Street,
        FilterColumn::House,
        FilterColumn::Telephone,
    ];

    /// Display label, also accepted when parsing
    pub fn label(&self) -> &'static str {
        match self {
            FilterColumn::Id => "ID",
            FilterColumn::Surname => "Surname",
            FilterColumn::Name => "Name",
            FilterColumn::Patronymic => "Patronymic",
            FilterColumn::City => "City",
            FilterColumn::Street => "Street",
            FilterColumn::House => "House",
            FilterColumn::Telephone => "Telephone",
        }
    }

    /// SQL expression for this column within [`BASE_QUERY`]
    fn expr(&self) -> &'static str {
        match self {
            FilterColumn::Id => "CAST(d.uid AS TEXT)",
            FilterColumn::Surname => "s.value",
            FilterColumn::Name => "n.value",
            FilterColumn::Patronymic => "p.value",
            FilterColumn::City => "d.city",
            FilterColumn::Street => "d.street",
            FilterColumn::House => "CAST(d.house AS TEXT)",
            FilterColumn::Telephone => "d.telephone",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterColumn {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FilterColumn::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DirectoryError::UnknownColumn(s.to_string()))
    }
}

/// Search term plus per-column filters for one listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    search: String,
    columns: BTreeMap<FilterColumn, String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text term matched against every searchable column
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the filter for one column, replacing any earlier value
    pub fn with_column(mut self, column: FilterColumn, value: impl Into<String>) -> Self {
        self.columns.insert(column, value.into());
        self
    }

    /// Set a column filter by its label (e.g. `"City"`)
    pub fn set_label(&mut self, label: &str, value: impl Into<String>) -> Result<(), DirectoryError> {
        let column: FilterColumn = label.parse()?;
        self.columns.insert(column, value.into());
        Ok(())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Column filters with a non-blank value, in column order
    pub fn active_columns(&self) -> impl Iterator<Item = (FilterColumn, &str)> {
        self.columns
            .iter()
            .map(|(c, v)| (*c, v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    /// True when neither a search term nor any column filter is active
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.active_columns().next().is_none()
    }

    /// Build the parameterized listing query for this spec
    pub fn build_query(&self) -> SelectQuery {
        build_query(self.search(), &self.columns)
    }
}

/// A WHERE-clause condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive literal substring match of a column
    Contains { column: FilterColumn, needle: String },
    /// At least one child holds
    Any(Vec<Predicate>),
    /// Every child holds
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn contains(column: FilterColumn, needle: &str) -> Self {
        Predicate::Contains {
            column,
            needle: needle.to_string(),
        }
    }

    /// Append this predicate's SQL, pushing one parameter per placeholder
    fn render(&self, sql: &mut String, params: &mut Vec<String>) {
        match self {
            Predicate::Contains { column, needle } => {
                sql.push_str("casefold(");
                sql.push_str(column.expr());
                sql.push_str(") LIKE casefold(?) ESCAPE '\\'");
                params.push(like_pattern(needle));
            }
            Predicate::Any(children) => render_group(children, " OR ", sql, params),
            Predicate::All(children) => render_group(children, " AND ", sql, params),
        }
    }
}

fn render_group(children: &[Predicate], joiner: &str, sql: &mut String, params: &mut Vec<String>) {
    sql.push('(');
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            sql.push_str(joiner);
        }
        child.render(sql, params);
    }
    sql.push(')');
}

/// Wrap a term in `%` wildcards, escaping LIKE metacharacters it contains
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Query text with its positional parameters, in placeholder order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// Build the listing query for a search term and column filters
///
/// The search term becomes one OR-group over [`FilterColumn::SEARCHABLE`];
/// each non-blank column filter adds one condition. All conditions are
/// ANDed together. With nothing active, no WHERE clause is emitted.
pub fn build_query(search_term: &str, column_filters: &BTreeMap<FilterColumn, String>) -> SelectQuery {
    let mut conditions = Vec::new();

    let term = search_term.trim();
    if !term.is_empty() {
        conditions.push(Predicate::Any(
            FilterColumn::SEARCHABLE
                .iter()
                .map(|c| Predicate::contains(*c, term))
                .collect(),
        ));
    }

    for (column, value) in column_filters {
        let value = value.trim();
        if !value.is_empty() {
            conditions.push(Predicate::contains(*column, value));
        }
    }

    let mut sql = String::from(BASE_QUERY);
    let mut params = Vec::new();

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                sql.push_str(" AND ");
            }
            condition.render(&mut sql, &mut params);
        }
    }

    SelectQuery { sql, params }
}

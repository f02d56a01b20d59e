//! Sort specification parsed from an opaque request blob.
//!
//! Parsing never fails: anything unrecognized falls back to `id ASC`, since
//! ordering only affects presentation. Columns are resolved through each
//! entity's allow-list enum, so only `'static` identifiers reach SQL.

use serde::Deserialize;
use std::fmt;

/// Allow-listed sort column for one entity
pub trait SortColumn: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Resolve a client-supplied name; `None` when it is not allow-listed
    fn from_name(name: &str) -> Option<Self>;

    /// Bare SQL column name
    fn column_name(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawOrdering {
    column: Option<String>,
    #[serde(alias = "direction", alias = "order")]
    dir: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordering<C: SortColumn> {
    column: C,
    direction: SortDirection,
}

impl<C: SortColumn> Ordering<C> {
    pub fn new(column: C, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Parse `{"column": "...", "dir": "ASC|DESC"}`, `column` or `column:dir`.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => raw,
            None => return Self::default(),
        };

        let (column, dir) = if raw.starts_with('{') {
            match serde_json::from_str::<RawOrdering>(raw) {
                Ok(parsed) => (parsed.column, parsed.dir),
                Err(e) => {
                    tracing::debug!(error = %e, "Malformed ordering blob, using defaults");
                    return Self::default();
                }
            }
        } else {
            let mut parts = raw.splitn(2, ':');
            (
                parts.next().map(str::to_string),
                parts.next().map(str::to_string),
            )
        };

        let column = match column.as_deref().map(str::trim) {
            Some(name) => C::from_name(name).unwrap_or_else(|| {
                tracing::debug!(column = name, "Ordering column not allowed, using default");
                C::default()
            }),
            None => C::default(),
        };

        let direction = dir
            .as_deref()
            .and_then(SortDirection::parse)
            .unwrap_or_default();

        Self { column, direction }
    }

    pub fn column(&self) -> C {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Quoted column identifier and direction keyword
    pub fn build(&self) -> (String, &'static str) {
        (
            format!("\"{}\"", self.column.column_name()),
            self.direction.as_sql(),
        )
    }
}

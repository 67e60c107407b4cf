//! # Query Engine
//!
//! Pure functions over a snapshot of records. Nothing here touches a store:
//! callers fetch a snapshot with [`crate::store::RecordStore::list`] and pass it in.
//!
//! - [`search`]: case-insensitive name match, or exact id match
//! - [`sort_by`]: order by name or creation time
//! - [`statistics`]: counts and date ranges
//!
//! ## Ordering Rules
//!
//! Names use the Unicode Collation Algorithm with the root locale: base letters
//! first, accents second, case last. `alice` sorts before `Bob`, `Émile`
//! before `Eve`, `Emile` before `Émile` and `apple` before `Apple`.
//!
//! Creation times that do not parse sort after every parseable time when
//! ascending, keeping their input order among themselves.
//!
//! [`SortOrder::Descending`] is the ascending result reversed, so records
//! that compare equal come out in reverse input order.
//! [`SortOrder::StableDescending`] sorts with the comparison inverted and keeps
//! equal records in input order.

use crate::error::{Result, VaultError};
use crate::model::Record;
use chrono::{DateTime, Utc};
use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Created,
}

impl FromStr for SortField {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "created" => Ok(SortField::Created),
            other => Err(VaultError::validation(format!(
                "Invalid field: {} (expected name or created)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Name => write!(f, "name"),
            SortField::Created => write!(f, "created"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
    StableDescending,
}

impl FromStr for SortOrder {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            "stable-descending" => Ok(SortOrder::StableDescending),
            other => Err(VaultError::validation(format!(
                "Invalid order: {} (expected ascending or descending)",
                other
            ))),
        }
    }
}

/// Records whose name contains `keyword` (ignoring case) or whose rendered id
/// equals it. An empty keyword matches everything.
pub fn search(records: &[Record], keyword: &str) -> Vec<Record> {
    let needle = keyword.to_lowercase();
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle) || r.id.to_string() == keyword)
        .cloned()
        .collect()
}

pub fn sort_by(records: &[Record], field: SortField, order: SortOrder) -> Vec<Record> {
    let collator = NameCollator::new();
    let compare = |a: &Record, b: &Record| match field {
        SortField::Name => collator.compare(&a.name, &b.name),
        SortField::Created => compare_dates(a.created.as_datetime(), b.created.as_datetime()),
    };

    let mut sorted = records.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| compare(a, b)),
        SortOrder::Descending => {
            sorted.sort_by(|a, b| compare(a, b));
            sorted.reverse();
        }
        SortOrder::StableDescending => sorted.sort_by(|a, b| compare(b, a)),
    }
    sorted
}

/// Orders names the way a reader expects: base letters, then accents, then
/// lowercase before uppercase.
pub struct NameCollator {
    inner: Option<Collator>,
}

impl NameCollator {
    /// Root-locale collator from the compiled-in CLDR data.
    pub fn new() -> Self {
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Self {
                inner: Some(collator),
            },
            Err(e) => {
                tracing::warn!(error = %e, "collation data unavailable, using case-folded order");
                Self { inner: None }
            }
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.inner {
            Some(collator) => collator.compare(a, b),
            None => fold_compare(a, b),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two names with a one-off [`NameCollator`].
pub fn collate(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}

fn fold_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| case_tiebreak(a, b))
}

fn case_tiebreak(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}

// Unparseable dates go after every real date.
fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_records: usize,
    pub last_modified: Option<DateTime<Utc>>,
    pub longest_name: Record,
    pub longest_name_len: usize,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

pub fn statistics(records: &[Record]) -> Result<Stats> {
    let first = records.first().ok_or(VaultError::EmptyCollection)?;

    let last_modified = records
        .iter()
        .filter_map(|r| r.last_modified().as_datetime())
        .max();

    let mut longest = first;
    let mut longest_len = first.name.chars().count();
    for r in &records[1..] {
        let len = r.name.chars().count();
        if len > longest_len {
            longest = r;
            longest_len = len;
        }
    }

    let created: Vec<DateTime<Utc>> = records
        .iter()
        .filter_map(|r| r.created.as_datetime())
        .collect();

    Ok(Stats {
        total_records: records.len(),
        last_modified,
        longest_name: longest.clone(),
        longest_name_len: longest_len,
        earliest: created.iter().min().copied(),
        latest: created.iter().max().copied(),
    })
}

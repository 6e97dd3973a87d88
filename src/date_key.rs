use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const KEY_PREFIX: &str = "todo-";

const LABEL_FORMAT: &str = "%A (%-m/%-d/%Y)";
const PARSE_FORMAT: &str = "%A (%m/%d/%Y)";

/// One day's checklist label, e.g. `Monday (10/19/2026)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Keeps the label verbatim so it maps back to the exact storage key.
    pub fn new(label: impl AsRef<str>) -> Option<Self> {
        let label = label.as_ref();
        if label.trim().is_empty() {
            return None;
        }
        Some(Self(label.to_string()))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(LABEL_FORMAT).to_string())
    }

    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, PARSE_FORMAT).ok()
    }

    pub fn storage_key(&self) -> String {
        format!("{KEY_PREFIX}{}", self.0)
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(KEY_PREFIX).and_then(Self::new)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Newest dated key first; undated keys trail in lexicographic order.
pub fn newest_first(a: &DateKey, b: &DateKey) -> Ordering {
    match (a.date(), b.date()) {
        (Some(left), Some(right)) => right.cmp(&left).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

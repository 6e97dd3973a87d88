use crate::date_key::{newest_first, DateKey};
use crate::errors::ChecklistError;
use crate::models::TaskRecord;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

/// Tasks written the first time a date is opened.
pub const DEFAULT_TASKS: [&str; 5] = [
    "elsie's room",
    "living room",
    "dining room",
    "kitchen",
    "bathroom",
];

pub fn seed_list() -> Vec<TaskRecord> {
    DEFAULT_TASKS.iter().map(|text| TaskRecord::new(*text)).collect()
}

pub fn encode_list(list: &[TaskRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(list)
}

pub fn decode_list(raw: &str) -> Result<Vec<TaskRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Storage key to serialized task array, rewritten in full on every save.
#[derive(Debug, Default)]
pub struct Store {
    data_path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
    index: BTreeSet<DateKey>,
}

impl Store {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path).await;
        let index: BTreeSet<DateKey> = entries
            .keys()
            .filter_map(|key| DateKey::from_storage_key(key))
            .collect();
        info!("opened store at {} with {} lists", path.display(), index.len());

        Self {
            data_path: Some(path),
            entries,
            index,
        }
    }

    /// Seeds `date` first if it is new or its entry no longer decodes.
    pub async fn load(&mut self, date: &DateKey) -> Result<Vec<TaskRecord>, ChecklistError> {
        if let Some(raw) = self.entries.get(&date.storage_key()) {
            match decode_list(raw) {
                Ok(list) => return Ok(list),
                Err(err) => warn!("stored list for {date} is malformed, reseeding: {err}"),
            }
        }

        let seed = seed_list();
        self.save(date, &seed).await?;
        Ok(seed)
    }

    pub async fn save(&mut self, date: &DateKey, list: &[TaskRecord]) -> Result<(), ChecklistError> {
        let payload = encode_list(list).map_err(ChecklistError::storage)?;
        let mut next = self.entries.clone();
        next.insert(date.storage_key(), payload);

        if let Some(path) = &self.data_path {
            persist_entries(path, &next).await?;
        }

        self.entries = next;
        self.index.insert(date.clone());
        Ok(())
    }

    pub fn list_date_keys(&self) -> Vec<DateKey> {
        let mut keys: Vec<DateKey> = self.index.iter().cloned().collect();
        keys.sort_by(newest_first);
        keys
    }
}

async fn read_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

async fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), ChecklistError> {
    let payload = serde_json::to_vec_pretty(entries).map_err(ChecklistError::storage)?;
    fs::write(path, payload).await.map_err(ChecklistError::storage)?;
    Ok(())
}

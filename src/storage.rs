/// Record store over chrome.storage.local
///
/// The whole job list lives under a single key. Every operation reads the
/// list, applies its change and writes the full list back; there is no
/// cross-surface locking, so the last writer wins.
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::job_data::{JobRecord, NewJob};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Async key-value slot storage (chrome.storage.local in the extension)
#[allow(async_fn_in_trait)]
pub trait KeyValueStorage {
    /// `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Fresh 128-bit random job id
pub fn new_job_id() -> String {
    Uuid::new_v4().to_string()
}

/// The stored job list, serialized as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobList {
    pub jobs: Vec<JobRecord>,
}

impl JobList {
    pub fn new() -> Self {
        JobList { jobs: Vec::new() }
    }

    pub fn from_value(value: Option<Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(JobList::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.jobs.iter().any(|job| job.url == url)
    }

    pub fn add_job(&mut self, job: JobRecord) {
        self.jobs.push(job);
    }

    pub fn remove_job(&mut self, id: &str) -> bool {
        let original_len = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        self.jobs.len() < original_len
    }

    /// Give every record without an id a fresh one. Returns how many were
    /// assigned; existing ids are left alone.
    pub fn backfill_ids(&mut self) -> usize {
        let mut assigned = 0;
        for job in self.jobs.iter_mut().filter(|job| !job.has_id()) {
            job.id = new_job_id();
            assigned += 1;
        }
        assigned
    }
}

pub struct RecordStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> RecordStore<S> {
    pub fn new(storage: S, config: &TrackerConfig) -> Self {
        RecordStore {
            storage,
            key: config.storage_key.clone(),
        }
    }

    /// Read the list, backfilling missing ids. The corrected list is written
    /// back before it is returned, so a failed write fails the load.
    async fn load(&self) -> Result<JobList> {
        let value = self.storage.get(&self.key).await?;
        let mut list = JobList::from_value(value)?;

        let assigned = list.backfill_ids();
        if assigned > 0 {
            info!("assigned ids to {} legacy job records", assigned);
            self.save(&list).await?;
        }

        Ok(list)
    }

    async fn save(&self, list: &JobList) -> Result<()> {
        self.storage.set(&self.key, list.to_value()?).await
    }

    pub async fn list_all(&self) -> Result<Vec<JobRecord>> {
        Ok(self.load().await?.jobs)
    }

    /// Store a new job unless its URL is already tracked.
    pub async fn add(&self, candidate: NewJob) -> Result<JobRecord> {
        let mut list = self.load().await?;

        if list.contains_url(&candidate.url) {
            warn!("job already tracked: {}", candidate.url);
            return Err(TrackerError::AlreadyTracked { url: candidate.url });
        }

        let job = candidate.into_record(new_job_id());
        list.add_job(job.clone());
        self.save(&list).await?;

        info!("tracked {} at {} ({})", job.role, job.company, job.id);
        Ok(job)
    }

    /// Delete by id. Deleting an unknown id succeeds without a change.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut list = self.load().await?;

        if !list.remove_job(id) {
            debug!("remove: no job with id {}", id);
        }
        self.save(&list).await
    }

    pub async fn clear(&self) -> Result<()> {
        info!("clearing all tracked jobs");
        self.save(&JobList::new()).await
    }
}

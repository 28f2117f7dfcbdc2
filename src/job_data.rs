/// Data structures for tracked job applications
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_ROLE: &str = "Unknown Role";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// A tracked application as stored under the "jobs" key
///
/// Records written by older versions of the extension have no `id`; those
/// deserialize with an empty one and get backfilled on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRecord {
    #[serde(default)]
    pub id: String,
    pub role: String,
    pub company: String,
    pub url: String,
    pub date: NaiveDate,
}

impl JobRecord {
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whole days between the tracking date and `today`; negative for
    /// future-dated records.
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.date).num_days()
    }
}

/// Role and company scraped from a confirmation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    pub role: String,
    pub company: String,
}

impl Default for JobInfo {
    fn default() -> Self {
        JobInfo {
            role: UNKNOWN_ROLE.to_string(),
            company: UNKNOWN_COMPANY.to_string(),
        }
    }
}

/// A record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub role: String,
    pub company: String,
    pub url: String,
    pub date: NaiveDate,
}

impl NewJob {
    pub fn new(info: JobInfo, url: String, date: NaiveDate) -> NewJob {
        NewJob {
            role: info.role,
            company: info.company,
            url,
            date,
        }
    }

    pub fn into_record(self, id: String) -> JobRecord {
        JobRecord {
            id,
            role: self.role,
            company: self.company,
            url: self.url,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_stored_format() {
        let json = r#"{
            "id": "abc",
            "role": "Software Engineer",
            "company": "Google",
            "url": "https://www.linkedin.com/jobs/view/1",
            "date": "2024-10-28"
        }"#;

        let job: JobRecord = serde_json::from_str(json).unwrap();

        assert_eq!(job.id, "abc");
        assert_eq!(job.company, "Google");
        assert_eq!(job.date, date(2024, 10, 28));
    }

    #[test]
    fn test_legacy_record_without_id() {
        let json = r#"{"role":"Dev","company":"Acme","url":"https://acme.lever.co/1","date":"2024-01-02"}"#;

        let job: JobRecord = serde_json::from_str(json).unwrap();

        assert!(!job.has_id());
    }

    #[test]
    fn test_date_serializes_without_time() {
        let job = NewJob::new(JobInfo::default(), "https://x.io".to_string(), date(2024, 3, 9))
            .into_record("id-1".to_string());

        let json = serde_json::to_value(&job).unwrap();

        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["role"], UNKNOWN_ROLE);
        assert_eq!(json["company"], UNKNOWN_COMPANY);
    }

    #[test]
    fn test_age_days() {
        let job = NewJob::new(JobInfo::default(), "https://x.io".to_string(), date(2024, 2, 25))
            .into_record("id-1".to_string());

        assert_eq!(job.age_days(date(2024, 3, 3)), 7);
        assert_eq!(job.age_days(date(2024, 2, 25)), 0);
        assert_eq!(job.age_days(date(2024, 2, 24)), -1);
    }
}

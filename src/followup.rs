/// Follow-up email drafting
use crate::error::{Result, TrackerError};
use crate::job_data::JobRecord;
use chrono::NaiveDate;

/// The oldest job that is due for a follow-up, or the oldest job overall
/// when none is due yet.
pub fn select_follow_up_target(
    records: &[JobRecord],
    today: NaiveDate,
    follow_up_after_days: i64,
) -> Result<&JobRecord> {
    let mut oldest_first: Vec<&JobRecord> = records.iter().collect();
    oldest_first.sort_by_key(|job| job.date);

    oldest_first
        .iter()
        .find(|job| job.age_days(today) >= follow_up_after_days)
        .or_else(|| oldest_first.first())
        .copied()
        .ok_or(TrackerError::NoRecords)
}

/// How long ago the application went out, in words
pub fn time_frame(days_since: i64) -> &'static str {
    match days_since {
        d if d <= 7 => "recently",
        d if d <= 14 => "about two weeks ago",
        d if d <= 30 => "about a month ago",
        _ => "some time ago",
    }
}

pub fn compose_email(job: &JobRecord, days_since: i64) -> String {
    format!(
        "Subject: Following Up – {role} Application

Hi Hiring Team,

I hope this message finds you well! I applied for the {role} position at {company} {when} and wanted to express my continued enthusiasm for this opportunity.

I'm very excited about the possibility of contributing to {company} and believe my skills and experience align well with what you're looking for in this role.

I'd welcome the chance to discuss how my background could benefit your team. Please let me know if you need any additional information from me or if there are any updates on the hiring process.

Thank you for your time and consideration.

Best regards,
[Your Name]
[Your Phone]
[Your LinkedIn]",
        role = job.role,
        company = job.company,
        when = time_frame(days_since),
    )
}

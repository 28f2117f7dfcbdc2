/// Popup list projection: ordering, ages, urgency and markup
use crate::job_data::JobRecord;
use chrono::NaiveDate;

/// A record annotated for display
#[derive(Debug, Clone, PartialEq)]
pub struct JobView {
    pub record: JobRecord,
    pub age_days: i64,
    pub urgent: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStats {
    pub total: usize,
    pub needs_follow_up: usize,
}

/// Most recent first. Ages of future-dated records stay negative.
pub fn project(records: &[JobRecord], today: NaiveDate, follow_up_after_days: i64) -> Vec<JobView> {
    let mut views: Vec<JobView> = records
        .iter()
        .map(|record| {
            let age_days = record.age_days(today);
            JobView {
                record: record.clone(),
                age_days,
                urgent: age_days >= follow_up_after_days,
            }
        })
        .collect();

    views.sort_by(|a, b| b.record.date.cmp(&a.record.date));
    views
}

pub fn stats(views: &[JobView]) -> JobStats {
    JobStats {
        total: views.len(),
        needs_follow_up: views.iter().filter(|view| view.urgent).count(),
    }
}

/// Age badge text
pub fn format_days(days: i64) -> String {
    match days {
        d if d < 0 => "Upcoming".to_string(),
        0 => "Today".to_string(),
        1 => "1 day ago".to_string(),
        d => format!("{} days ago", d),
    }
}

/// Entity-escape text scraped from job pages before it goes into markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#x2F;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Inner markup of a job card
pub fn card_markup(view: &JobView) -> String {
    let badge_class = if view.urgent { "days-badge urgent" } else { "days-badge" };
    let follow_up = if view.urgent { "<span>⚠️ Follow up!</span>" } else { "" };

    format!(
        r#"<div class="job-body"><div class="role">{}</div><div class="company">{}</div><div class="meta"><span class="{}">{}</span>{}</div></div>"#,
        escape_html(&view.record.role),
        escape_html(&view.record.company),
        badge_class,
        format_days(view.age_days),
        follow_up
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 28).unwrap()
    }

    fn create_test_job(id: &str, days_ago: i64) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            role: "Software Engineer".to_string(),
            company: "Google".to_string(),
            url: format!("https://jobs.lever.co/google/{}", id),
            date: today() - chrono::Duration::days(days_ago),
        }
    }

    #[test]
    fn test_project_sorts_newest_first() {
        let jobs = vec![
            create_test_job("old", 20),
            create_test_job("new", 1),
            create_test_job("mid", 8),
        ];

        let views = project(&jobs, today(), 7);
        let ids: Vec<&str> = views.iter().map(|v| v.record.id.as_str()).collect();

        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_urgency_threshold() {
        let jobs = vec![create_test_job("seven", 7), create_test_job("six", 6)];

        let views = project(&jobs, today(), 7);

        assert_eq!(views[0].record.id, "six");
        assert_eq!(views[0].age_days, 6);
        assert!(!views[0].urgent);
        assert_eq!(views[1].age_days, 7);
        assert!(views[1].urgent);
    }

    #[test]
    fn test_future_dated_record_keeps_negative_age() {
        let jobs = vec![create_test_job("future", -3)];

        let views = project(&jobs, today(), 7);

        assert_eq!(views[0].age_days, -3);
        assert!(!views[0].urgent);
    }

    #[test]
    fn test_stats() {
        let jobs = vec![
            create_test_job("a", 10),
            create_test_job("b", 3),
            create_test_job("c", 7),
        ];

        let stats = stats(&project(&jobs, today(), 7));

        assert_eq!(stats, JobStats { total: 3, needs_follow_up: 2 });
        assert_eq!(super::stats(&[]), JobStats::default());
    }

    #[test]
    fn test_format_days() {
        assert_eq!(format_days(0), "Today");
        assert_eq!(format_days(1), "1 day ago");
        assert_eq!(format_days(12), "12 days ago");
        assert_eq!(format_days(-2), "Upcoming");
    }

    #[test]
    fn test_escape_html() {
        let escaped = escape_html("<script>alert(1)</script>");

        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert_eq!(escaped, "&lt;script&gt;alert(1)&lt;&#x2F;script&gt;");
        assert_eq!(escape_html(r#"Tom & "Jerry's""#), "Tom &amp; &quot;Jerry&#39;s&quot;");
    }

    #[test]
    fn test_card_markup_escapes_fields() {
        let mut job = create_test_job("x", 9);
        job.company = "<img src=x onerror=alert(1)>".to_string();

        let markup = card_markup(&project(&[job], today(), 7)[0]);

        assert!(!markup.contains("<img"));
        assert!(markup.contains("days-badge urgent"));
        assert!(markup.contains("9 days ago"));
        assert!(markup.contains("Follow up!"));
    }
}

/// Confirmation-page detection and job info extraction
use crate::job_data::{JobInfo, UNKNOWN_COMPANY};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// A job site and the phrases its confirmation page shows
pub struct SiteRule {
    pub pattern: &'static str,
    pub phrases: &'static [&'static str],
}

pub const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        pattern: "linkedin.com/jobs",
        phrases: &[
            "your application was sent",
            "application sent",
            "you applied for this job",
        ],
    },
    SiteRule {
        pattern: "greenhouse.io",
        phrases: &["thank you for applying"],
    },
    SiteRule {
        pattern: "lever.co",
        phrases: &["thanks for applying"],
    },
    SiteRule {
        pattern: "indeed.com",
        phrases: &["application completed"],
    },
    SiteRule {
        pattern: "workday.com",
        phrases: &["application submitted"],
    },
];

/// Job board suffixes that trail the role in page titles
static TITLE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" \| LinkedIn| - Greenhouse").expect("valid title noise pattern")
});

/// Host plus path, lower-cased, for matching site patterns like
/// "linkedin.com/jobs". Unparseable URLs are matched as given.
fn match_target(url: &str) -> String {
    let target = match Url::parse(url) {
        Ok(parsed) => format!("{}{}", parsed.host_str().unwrap_or(""), parsed.path()),
        Err(_) => url.to_string(),
    };
    target.to_lowercase()
}

/// Does this page look like a submitted application?
pub fn is_confirmation(url: &str, page_text: &str) -> bool {
    let target = match_target(url);
    let text = page_text.to_lowercase();

    SITE_RULES.iter().any(|rule| {
        target.contains(rule.pattern) && rule.phrases.iter().any(|phrase| text.contains(phrase))
    })
}

/// Best-effort role and company from the page title or first heading
///
/// Titles look like "Software Engineer at Google | LinkedIn".
pub fn extract_job_info(page_title: &str, first_heading: Option<&str>) -> JobInfo {
    if let Some((left, right)) = page_title.split_once(" at ") {
        let role = TITLE_NOISE.replace_all(left, "").trim().to_string();
        let company = right
            .split(" | ")
            .next()
            .and_then(|s| s.split(" - ").next())
            .unwrap_or(right)
            .trim()
            .to_string();
        return JobInfo { role, company };
    }

    match first_heading {
        Some(heading) => JobInfo {
            role: heading.trim().to_string(),
            company: UNKNOWN_COMPANY.to_string(),
        },
        None => JobInfo::default(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Not matched yet, keep polling
    Continue,
    /// Matched: stop polling and show the track button
    Fire,
    /// Out of attempts or already fired: stop polling
    Stop,
}

/// Poll loop state owned by the content script entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionPoll {
    pub attempts_remaining: u32,
    pub matched: bool,
    pub button_injected: bool,
}

impl DetectionPoll {
    pub fn new(max_attempts: u32) -> Self {
        DetectionPoll {
            attempts_remaining: max_attempts,
            matched: false,
            button_injected: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.matched || self.attempts_remaining == 0
    }

    /// The check made at start-up; it does not use up an attempt.
    pub fn check_now(&mut self, is_match: bool) -> PollStep {
        if self.matched {
            return PollStep::Stop;
        }
        self.record(is_match)
    }

    /// One interval tick.
    pub fn tick(&mut self, is_match: bool) -> PollStep {
        if self.is_finished() {
            return PollStep::Stop;
        }
        self.attempts_remaining -= 1;

        match self.record(is_match) {
            PollStep::Continue if self.attempts_remaining == 0 => PollStep::Stop,
            step => step,
        }
    }

    fn record(&mut self, is_match: bool) -> PollStep {
        if is_match {
            self.matched = true;
            PollStep::Fire
        } else {
            PollStep::Continue
        }
    }

    /// Claim the single track button for this page load. Returns false if
    /// it was already shown.
    pub fn claim_button(&mut self) -> bool {
        if self.button_injected {
            return false;
        }
        self.button_injected = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_data::UNKNOWN_ROLE;

    #[test]
    fn test_is_confirmation_linkedin() {
        let url = "https://www.linkedin.com/jobs/view/12345/";

        assert!(is_confirmation(url, "Your application was sent to Google"));
        assert!(is_confirmation(url, "You applied for this job 2 minutes ago"));
        assert!(!is_confirmation(url, "Easy Apply"));
    }

    #[test]
    fn test_is_confirmation_needs_jobs_path_on_linkedin() {
        assert!(!is_confirmation(
            "https://www.linkedin.com/feed/",
            "Application sent"
        ));
    }

    #[test]
    fn test_is_confirmation_other_sites() {
        assert!(is_confirmation(
            "https://boards.greenhouse.io/acme/jobs/1",
            "Thank you for applying!"
        ));
        assert!(is_confirmation("https://jobs.lever.co/acme/1/thanks", "THANKS FOR APPLYING"));
        assert!(is_confirmation("https://www.indeed.com/viewjob", "Application completed"));
        assert!(is_confirmation(
            "https://acme.wd5.myworkdayjobs.workday.com/x",
            "Application Submitted"
        ));
    }

    #[test]
    fn test_is_confirmation_phrase_from_wrong_site() {
        assert!(!is_confirmation(
            "https://jobs.lever.co/acme/1",
            "Thank you for applying"
        ));
        assert!(!is_confirmation("https://example.com", "application submitted"));
    }

    #[test]
    fn test_is_confirmation_unparseable_url() {
        assert!(is_confirmation("greenhouse.io/acme", "thank you for applying"));
    }

    #[test]
    fn test_extract_job_info_from_title() {
        let info = extract_job_info("Software Engineer at Google | LinkedIn", None);

        assert_eq!(info.role, "Software Engineer");
        assert_eq!(info.company, "Google");
    }

    #[test]
    fn test_extract_job_info_strips_noise() {
        let info = extract_job_info("Backend Developer | LinkedIn at Acme - Careers", None);

        assert_eq!(info.role, "Backend Developer");
        assert_eq!(info.company, "Acme");

        let info = extract_job_info("Data Analyst - Greenhouse at Initech", Some("ignored"));

        assert_eq!(info.role, "Data Analyst");
        assert_eq!(info.company, "Initech");
    }

    #[test]
    fn test_extract_job_info_splits_once() {
        let info = extract_job_info("Engineer at Foo at Bar | Site", None);

        assert_eq!(info.role, "Engineer");
        assert_eq!(info.company, "Foo at Bar");
    }

    #[test]
    fn test_extract_job_info_from_heading() {
        let info = extract_job_info("Application", Some("  Product Manager \n"));

        assert_eq!(info.role, "Product Manager");
        assert_eq!(info.company, UNKNOWN_COMPANY);
    }

    #[test]
    fn test_extract_job_info_fallback() {
        assert_eq!(extract_job_info("Thanks!", None), JobInfo::default());
        assert_eq!(JobInfo::default().role, UNKNOWN_ROLE);
    }

    #[test]
    fn test_poll_fires_on_immediate_match() {
        let mut poll = DetectionPoll::new(30);

        assert_eq!(poll.check_now(true), PollStep::Fire);
        assert_eq!(poll.attempts_remaining, 30);
        assert_eq!(poll.tick(true), PollStep::Stop);
    }

    #[test]
    fn test_poll_fires_once() {
        let mut poll = DetectionPoll::new(30);
        assert_eq!(poll.check_now(false), PollStep::Continue);
        assert_eq!(poll.tick(false), PollStep::Continue);

        assert_eq!(poll.tick(true), PollStep::Fire);
        assert_eq!(poll.tick(true), PollStep::Stop);
        assert!(poll.is_finished());
    }

    #[test]
    fn test_poll_exhausts_after_max_attempts() {
        let mut poll = DetectionPoll::new(30);
        poll.check_now(false);

        let steps: Vec<PollStep> = (0..30).map(|_| poll.tick(false)).collect();

        assert!(steps[..29].iter().all(|s| *s == PollStep::Continue));
        assert_eq!(steps[29], PollStep::Stop);
        assert_eq!(poll.tick(true), PollStep::Stop);
        assert!(!poll.matched);
    }

    #[test]
    fn test_poll_match_on_last_attempt() {
        let mut poll = DetectionPoll::new(2);
        poll.tick(false);

        assert_eq!(poll.tick(true), PollStep::Fire);
    }

    #[test]
    fn test_claim_button_once() {
        let mut poll = DetectionPoll::new(30);

        assert!(poll.claim_button());
        assert!(!poll.claim_button());
    }
}

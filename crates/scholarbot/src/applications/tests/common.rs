use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::applications::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};
use crate::applications::tracker::ApplicationTracker;
use crate::discovery::{ScholarshipId, ScholarshipRecord};

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn scholarship(id: &str, title: &str, provider: &str, category: &str) -> ScholarshipRecord {
    ScholarshipRecord {
        id: ScholarshipId(id.to_string()),
        title: title.to_string(),
        provider: provider.to_string(),
        amount: "$5,000".to_string(),
        deadline: NaiveDate::from_ymd_opt(2024, 11, 30).expect("valid date"),
        description: "Funding for motivated students".to_string(),
        requirements: vec!["GPA 3.0+".to_string()],
        featured: false,
        category: category.to_string(),
        location: "Global".to_string(),
        kind: "Merit-based".to_string(),
    }
}

pub(super) fn application(
    id: &str,
    scholarship: ScholarshipRecord,
    status: ApplicationStatus,
) -> ApplicationRecord {
    let mut record = ApplicationRecord::pending(
        ApplicationId(id.to_string()),
        scholarship,
        at(2024, 8, 15),
        "Application under review.",
    );
    record.status = status;
    if status.is_terminal() {
        record.status_at = at(2024, 9, 1);
    }
    record
}

pub(super) fn app_id(raw: &str) -> ApplicationId {
    ApplicationId(raw.to_string())
}

/// One approved, one pending, one rejected, mirroring the seeded catalog.
pub(super) fn tracker() -> ApplicationTracker {
    ApplicationTracker::new(vec![
        application(
            "1",
            scholarship("s1", "Google Computer Science Scholarship", "Google Inc.", "Technology"),
            ApplicationStatus::Approved,
        ),
        application(
            "2",
            scholarship("s2", "MIT Innovation Scholarship", "MIT Foundation", "Engineering"),
            ApplicationStatus::Pending,
        ),
        application(
            "3",
            scholarship(
                "s3",
                "Women in Tech Leadership Grant",
                "Tech Leaders Foundation",
                "Technology",
            ),
            ApplicationStatus::Rejected,
        ),
    ])
}

pub(super) fn assert_counts_consistent(tracker: &ApplicationTracker) {
    let counts = tracker.counts();
    assert_eq!(
        counts.approved + counts.pending + counts.rejected,
        counts.total,
        "status counts must add up to the total"
    );
    assert_eq!(counts.total, tracker.len());
}

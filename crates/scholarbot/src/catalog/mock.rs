use chrono::{DateTime, NaiveDate, Utc};

use super::{Catalog, CatalogError, CatalogSource};
use crate::applications::{ApplicationId, ApplicationRecord, ApplicationStatus};
use crate::chat::{ChatMessage, Sender};
use crate::discovery::{ScholarshipId, ScholarshipRecord};
use crate::notifications::{NotificationId, NotificationKind, NotificationRecord};

/// Seed data shown to every new session.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

impl CatalogSource for MockCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let scholarships = scholarships();
        let applications = vec![
            application(
                "1",
                &scholarships[0],
                ApplicationStatus::Approved,
                (2024, 8, 15),
                (2024, 9, 1),
                "Congratulations! Your application has been approved.",
            ),
            application(
                "2",
                &scholarships[1],
                ApplicationStatus::Pending,
                (2024, 8, 20),
                (2024, 8, 20),
                "Application under review.",
            ),
            application(
                "3",
                &scholarships[2],
                ApplicationStatus::Rejected,
                (2024, 7, 10),
                (2024, 8, 5),
                "Thank you for your application. Unfortunately, we cannot offer you a scholarship at this time.",
            ),
        ];

        Ok(Catalog {
            scholarships,
            applications,
            notifications: notifications(),
            chat_history: chat_history(),
        })
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    date(year, month, day)
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

fn stamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn scholarship(
    id: &str,
    title: &str,
    provider: &str,
    amount: &str,
    deadline: NaiveDate,
    description: &str,
    requirements: &[&str],
    featured: bool,
    category: &str,
    location: &str,
    kind: &str,
) -> ScholarshipRecord {
    ScholarshipRecord {
        id: ScholarshipId(id.to_string()),
        title: title.to_string(),
        provider: provider.to_string(),
        amount: amount.to_string(),
        deadline,
        description: description.to_string(),
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
        featured,
        category: category.to_string(),
        location: location.to_string(),
        kind: kind.to_string(),
    }
}

fn scholarships() -> Vec<ScholarshipRecord> {
    vec![
        scholarship(
            "1",
            "Google Computer Science Scholarship",
            "Google Inc.",
            "$10,000",
            date(2024, 12, 15),
            "Supporting underrepresented groups in computer science with financial assistance and mentorship opportunities.",
            &["GPA 3.5+", "Computer Science Major", "Underrepresented group"],
            true,
            "Technology",
            "United States",
            "Merit-based",
        ),
        scholarship(
            "2",
            "MIT Innovation Scholarship",
            "MIT Foundation",
            "$15,000",
            date(2024, 11, 30),
            "For students pursuing innovative projects in science, technology, engineering, and mathematics.",
            &["Enrolled at MIT", "STEM Major", "Research Project"],
            false,
            "Engineering",
            "Massachusetts",
            "Research-based",
        ),
        scholarship(
            "3",
            "Women in Tech Leadership Grant",
            "Tech Leaders Foundation",
            "$7,500",
            date(2024, 10, 31),
            "Empowering women to become leaders in technology through education and professional development.",
            &["Female student", "Technology field", "Leadership experience"],
            true,
            "Technology",
            "Global",
            "Need-based",
        ),
        scholarship(
            "4",
            "Environmental Sciences Excellence Award",
            "Green Future Organization",
            "$5,000",
            date(2024, 9, 25),
            "Supporting students dedicated to environmental conservation and sustainable development.",
            &["Environmental Science Major", "GPA 3.0+", "Community service"],
            false,
            "Environmental",
            "North America",
            "Merit-based",
        ),
        scholarship(
            "5",
            "International Business Leaders Scholarship",
            "Global Business Institute",
            "$12,000",
            date(2024, 11, 15),
            "For students pursuing international business with a focus on global economic development.",
            &["Business Major", "International focus", "Language proficiency"],
            false,
            "Business",
            "International",
            "Merit-based",
        ),
    ]
}

fn application(
    id: &str,
    scholarship: &ScholarshipRecord,
    status: ApplicationStatus,
    applied: (i32, u32, u32),
    decided: (i32, u32, u32),
    notes: &str,
) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id.to_string()),
        scholarship: scholarship.clone(),
        status,
        applied_at: midnight(applied),
        status_at: midnight(decided),
        notes: notes.to_string(),
    }
}

fn notifications() -> Vec<NotificationRecord> {
    let notice = |id: &str, kind, title: &str, message: &str, at: &str, read| NotificationRecord {
        id: NotificationId(id.to_string()),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        timestamp: stamp(at),
        read,
    };

    vec![
        notice(
            "1",
            NotificationKind::Success,
            "Scholarship Approved!",
            "Congratulations! Your Google Computer Science Scholarship application has been approved.",
            "2024-09-15T09:30:00Z",
            false,
        ),
        notice(
            "2",
            NotificationKind::Info,
            "New Scholarship Match",
            "We found 3 new scholarships that match your profile.",
            "2024-09-14T14:20:00Z",
            false,
        ),
        notice(
            "3",
            NotificationKind::Warning,
            "Deadline Reminder",
            "MIT Innovation Scholarship deadline is in 5 days.",
            "2024-09-13T11:15:00Z",
            true,
        ),
    ]
}

fn chat_history() -> Vec<ChatMessage> {
    let message = |id: &str, sender, content: &str, at: &str| ChatMessage {
        id: id.to_string(),
        sender,
        content: content.to_string(),
        timestamp: stamp(at),
        attachment: None,
    };

    vec![
        message(
            "1",
            Sender::Bot,
            "Hello! I'm your scholarship assistant. How can I help you find the perfect scholarship today?",
            "2024-09-15T10:00:00Z",
        ),
        message(
            "2",
            Sender::User,
            "I'm looking for computer science scholarships for undergrad students.",
            "2024-09-15T10:01:00Z",
        ),
        message(
            "3",
            Sender::Bot,
            "Great! I found several computer science scholarships that match your profile. Based on your academic background, I'd recommend the Google Computer Science Scholarship and the MIT Innovation Scholarship. Would you like me to provide more details about these opportunities?",
            "2024-09-15T10:01:30Z",
        ),
        message(
            "4",
            Sender::User,
            "Yes, tell me more about the Google scholarship please.",
            "2024-09-15T10:02:00Z",
        ),
        message(
            "5",
            Sender::Bot,
            "The Google Computer Science Scholarship offers $10,000 to support underrepresented groups in computer science. Requirements include a GPA of 3.5+, being a Computer Science major, and belonging to an underrepresented group. The deadline is December 15th, 2024. Would you like me to help you with the application process?",
            "2024-09-15T10:02:30Z",
        ),
    ]
}

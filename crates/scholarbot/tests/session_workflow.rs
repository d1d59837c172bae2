use std::time::Duration;

use chrono::{TimeZone, Utc};
use scholarbot::applications::{ApplicationId, ApplicationStatus, TrackerError};
use scholarbot::auth::MockAuthenticator;
use scholarbot::catalog::{CsvCatalog, MockCatalog};
use scholarbot::chat::{Sender, CANNED_REPLIES};
use scholarbot::config::AppConfig;
use scholarbot::discovery::{FieldFilter, QueryParams, ScholarshipId};
use scholarbot::notice::{Notice, NoticeVariant};
use scholarbot::profile::ProfileField;
use scholarbot::{ScholarSession, SessionError};

fn quick_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.chat.reply_delay = Duration::from_millis(10);
    config.chat.reply_jitter = Duration::ZERO;
    config
}

fn open_session() -> ScholarSession<MockAuthenticator> {
    ScholarSession::init(
        &MockCatalog,
        MockAuthenticator,
        "alex.johnson@mit.edu",
        "password",
        &quick_config(),
    )
    .expect("mock session starts")
}

#[test]
fn discovery_filters_then_clears_back_to_full_catalog() {
    let mut session = open_session();
    assert_eq!(session.user().name, "Alex Johnson");

    session
        .discovery_mut()
        .set_search("leader")
        .set_category(FieldFilter::exactly("Technology"));
    let hits: Vec<_> = session.discover().iter().map(|s| s.id.0.clone()).collect();
    assert_eq!(hits, vec!["3".to_string()], "only the leadership grant is Technology");

    session.discovery_mut().set_kind(FieldFilter::exactly("Research-based"));
    assert!(session.discover().is_empty(), "conflicting filters yield nothing");

    session.discovery_mut().clear();
    assert_eq!(session.discover().len(), session.scholarships().len());
}

#[test]
fn withdraw_and_decide_keep_counts_consistent() {
    let mut session = open_session();
    let pending = ApplicationId("2".to_string());

    let approved = session.tracker().counts().approved;
    let err = session
        .withdraw(&ApplicationId("1".to_string()))
        .expect_err("approved applications cannot be withdrawn");
    let notice = Notice::from(&err);
    assert_eq!(notice.variant, NoticeVariant::Destructive);
    assert!(matches!(
        err,
        SessionError::Tracker(TrackerError::InvalidTransition { .. })
    ));

    let at = Utc.with_ymd_and_hms(2024, 9, 30, 8, 0, 0).unwrap();
    session
        .decide(&pending, ApplicationStatus::Approved, "Funded", at)
        .expect("pending application approved");
    let counts = session.tracker().counts();
    assert_eq!(counts.approved, approved + 1);
    assert_eq!(counts.pending, 0);
    assert_eq!(
        counts.approved + counts.pending + counts.rejected,
        counts.total
    );

    assert!(session.withdraw(&pending).is_err(), "decided applications stay on record");

    let rejected_only = QueryParams {
        status: FieldFilter::exactly("rejected"),
        ..QueryParams::default()
    };
    assert_eq!(session.tracker().query(&rejected_only).len(), 1);

    let dashboard = session.dashboard();
    assert_eq!(dashboard.success_rate_label, "67%");
}

#[test]
fn notifications_read_and_clear() {
    let mut session = open_session();
    assert_eq!(session.notifications().unread_count(), 2);

    session.notifications_mut().mark_all_read();
    assert_eq!(session.notifications().unread_count(), 0);
    session.notifications_mut().mark_all_read();
    assert_eq!(session.notifications().records().len(), 3);

    session.notifications_mut().clear_all();
    assert!(session.notifications().records().is_empty());
}

#[test]
fn bookmark_notices_follow_toggle_state() {
    let mut session = open_session();
    let id = ScholarshipId("1".to_string());

    let first = Notice::bookmark(session.toggle_bookmark(&id).expect("known scholarship"));
    assert_eq!(first.title, "Scholarship bookmarked");
    let second = Notice::bookmark(session.toggle_bookmark(&id).expect("known scholarship"));
    assert_eq!(second.title, "Bookmark removed");
    assert!(!session.bookmarks().is_bookmarked(&id));
}

#[test]
fn profile_edits_apply_on_save() {
    let mut session = open_session();
    let editor = session.profile_mut();
    editor.begin_edit().expect("edit mode");
    editor
        .set_field(ProfileField::Location, "Cambridge, MA")
        .expect("location set");
    editor.add_interest("Machine Learning").expect("interest added");
    editor.save().expect("saved");

    assert_eq!(session.user().location, "Cambridge, MA");
    assert!(session
        .user()
        .interests
        .iter()
        .any(|interest| interest == "Machine Learning"));
}

#[tokio::test]
async fn chat_reply_arrives_and_export_lists_every_message() {
    let session = open_session();
    let transcript = session.chat();
    let before = transcript.lock().expect("lock").messages().len();

    let handle = session
        .send_chat("  Any engineering grants?  ", None)
        .expect("message accepted");
    assert!(transcript.lock().expect("lock").is_typing());

    let reply = handle.await.expect("reply task");
    assert_eq!(reply.sender, Sender::Bot);
    assert!(CANNED_REPLIES.contains(&reply.content.as_str()));

    let export = transcript.lock().expect("lock").export_in(&Utc);
    let lines: Vec<_> = export.lines().collect();
    assert_eq!(lines.len(), before + 2);
    assert!(lines[before].ends_with("USER: Any engineering grants?"));
    assert!(lines[before + 1].contains("] BOT: "));

    assert!(matches!(
        session.send_chat("   ", None),
        Err(SessionError::Validation(_))
    ));

    session.clear_chat();
    assert_eq!(transcript.lock().expect("lock").messages().len(), 1);
    session.teardown();
}

#[test]
fn export_writes_a_dated_file() {
    let session = open_session();
    let dir = std::env::temp_dir().join(format!("scholarbot-export-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");

    let date = chrono::NaiveDate::from_ymd_opt(2024, 9, 15).expect("valid date");
    let path = session.export_chat(&dir, date).expect("export written");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("vidyavikas-chat-2024-09-15.txt")
    );
    let written = std::fs::read_to_string(&path).expect("export readable");
    assert_eq!(written.lines().count(), 5);

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn csv_catalog_feeds_a_session() {
    let dir = std::env::temp_dir().join(format!("scholarbot-csv-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let scholarships = dir.join("scholarships.csv");
    std::fs::write(
        &scholarships,
        "id,title,provider,amount,deadline,description,requirements,featured,category,location,type\n\
         k1,Kite Research Fund,Sky Lab,$3000,2025-05-01,Aerodynamics,GPA 3.2+,true,Engineering,Global,Research-based\n",
    )
    .expect("csv written");

    let catalog = CsvCatalog::new(&scholarships, None);
    let session = ScholarSession::init(
        &catalog,
        MockAuthenticator,
        "kite@example.edu",
        "pw",
        &quick_config(),
    )
    .expect("csv session starts");
    assert_eq!(session.scholarships().len(), 1);
    assert!(session.tracker().is_empty());
    assert_eq!(session.dashboard().featured.len(), 1);

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

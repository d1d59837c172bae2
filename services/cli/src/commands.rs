use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use clap::{Args, Subcommand};
use scholarbot::analytics::{
    category_breakdown, monthly_activity, CategoryShare, DashboardSnapshot, MonthlyActivity,
};
use scholarbot::applications::{
    ApplicationId, ApplicationStatus, ApplicationStatusView, StatusCounts,
};
use scholarbot::chat::ChatMessage;
use scholarbot::discovery::{FieldFilter, QueryParams, ScholarshipId, ScholarshipRecord};
use scholarbot::error::AppError;
use scholarbot::notice::Notice;
use scholarbot::notifications::{
    time_ago, NotificationCenter, NotificationId, NotificationKind, NotificationRecord,
};
use serde::Serialize;

use crate::infra::{inspect_file, parse_date, Output, Session};

#[derive(Args, Debug, Default)]
pub(crate) struct ScholarshipArgs {
    /// Case-insensitive text matched against title, provider and description
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact category, or `all`
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Exact scholarship type, e.g. Merit-based, or `all`
    #[arg(long = "type")]
    pub(crate) kind: Option<String>,
    /// Toggle the bookmark on a scholarship id (repeatable)
    #[arg(long)]
    pub(crate) bookmark: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ApplicationCommand {
    /// List applications with optional search and filters
    List(ApplicationListArgs),
    /// Withdraw a pending application
    Withdraw { id: String },
    /// Approve or reject a pending application
    Decide {
        id: String,
        #[arg(long, value_parser = parse_status)]
        status: ApplicationStatus,
        #[arg(long, default_value = "")]
        notes: String,
        /// Decision date (YYYY-MM-DD). Defaults to now.
        #[arg(long, value_parser = parse_date)]
        on: Option<NaiveDate>,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ApplicationListArgs {
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// pending, approved, rejected, or `all`
    #[arg(long, value_parser = parse_status_filter)]
    pub(crate) status: Option<FieldFilter>,
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long = "type")]
    pub(crate) kind: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct NotificationArgs {
    /// Mark a notification as read (repeatable)
    #[arg(long)]
    pub(crate) read: Vec<String>,
    /// Delete a notification (repeatable)
    #[arg(long)]
    pub(crate) delete: Vec<String>,
    #[arg(long)]
    pub(crate) mark_all_read: bool,
    #[arg(long)]
    pub(crate) clear: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ChatArgs {
    /// Messages to send, one reply is awaited per message
    pub(crate) messages: Vec<String>,
    /// Local file attached to the first message
    #[arg(long)]
    pub(crate) attach: Option<PathBuf>,
    /// Directory to write the transcript export into
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Reset the conversation to the greeting before sending
    #[arg(long)]
    pub(crate) clear: bool,
}

fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    raw.parse::<ApplicationStatus>()
        .map_err(|err| err.to_string())
}

fn parse_status_filter(raw: &str) -> Result<FieldFilter, String> {
    match FieldFilter::parse(raw) {
        FieldFilter::Any => Ok(FieldFilter::Any),
        FieldFilter::Exactly(value) => {
            parse_status(&value).map(|status| FieldFilter::exactly(status.label()))
        }
    }
}

#[derive(Debug, Serialize)]
struct ScholarshipListing<'a> {
    #[serde(flatten)]
    record: &'a ScholarshipRecord,
    bookmarked: bool,
}

pub(crate) fn run_scholarships(
    session: &mut Session,
    args: ScholarshipArgs,
    output: Output,
) -> Result<(), AppError> {
    let ScholarshipArgs {
        search,
        category,
        kind,
        bookmark,
    } = args;

    for id in bookmark {
        if let Some(change) = output.recover(session.toggle_bookmark(&ScholarshipId(id)))? {
            output.notice(&Notice::bookmark(change))?;
        }
    }

    let query = session.discovery_mut();
    if let Some(search) = search {
        query.set_search(search);
    }
    if let Some(category) = category {
        query.set_category(FieldFilter::parse(&category));
    }
    if let Some(kind) = kind {
        query.set_kind(FieldFilter::parse(&kind));
    }

    let total = session.scholarships().len();
    let listings: Vec<_> = session
        .discover()
        .into_iter()
        .map(|record| ScholarshipListing {
            record,
            bookmarked: session.bookmarks().is_bookmarked(&record.id),
        })
        .collect();

    output.emit(&listings, |listings| {
        if listings.is_empty() {
            println!("No scholarships found. Try adjusting your search or filters.");
            return;
        }
        println!("{} of {} scholarships", listings.len(), total);
        for listing in listings {
            let record = listing.record;
            println!(
                "- [{}] {}{} | {} | {} | due {}",
                record.id,
                record.title,
                if listing.bookmarked { " (saved)" } else { "" },
                record.provider,
                record.amount,
                record.deadline.format("%b %-d, %Y"),
            );
            println!(
                "    {} · {} · {}",
                record.category, record.kind, record.location
            );
        }
    })
}

pub(crate) fn run_applications(
    session: &mut Session,
    command: ApplicationCommand,
    output: Output,
) -> Result<(), AppError> {
    let params = match command {
        ApplicationCommand::List(args) => QueryParams {
            search: args.search.unwrap_or_default(),
            category: args
                .category
                .as_deref()
                .map(FieldFilter::parse)
                .unwrap_or_default(),
            kind: args
                .kind
                .as_deref()
                .map(FieldFilter::parse)
                .unwrap_or_default(),
            status: args.status.unwrap_or_default(),
        },
        ApplicationCommand::Withdraw { id } => {
            if output
                .recover(session.withdraw(&ApplicationId(id)))?
                .is_some()
            {
                output.notice(&Notice::withdrawn())?;
            }
            QueryParams::default()
        }
        ApplicationCommand::Decide {
            id,
            status,
            notes,
            on,
        } => {
            let at = on
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
                .unwrap_or_else(Utc::now);
            if let Some(record) =
                output.recover(session.decide(&ApplicationId(id), status, notes, at))?
            {
                output.notice(&Notice::info(
                    "Application updated",
                    format!("{} is now {}.", record.scholarship.title, record.status),
                ))?;
            }
            QueryParams::default()
        }
    };

    render_applications(session, &params, output)
}

#[derive(Debug, Serialize)]
struct ApplicationListing {
    counts: StatusCounts,
    success_rate: f64,
    applications: Vec<ApplicationStatusView>,
}

fn render_applications(
    session: &Session,
    params: &QueryParams,
    output: Output,
) -> Result<(), AppError> {
    let tracker = session.tracker();
    let listing = ApplicationListing {
        counts: tracker.counts(),
        success_rate: tracker.success_rate(),
        applications: tracker
            .query(params)
            .into_iter()
            .map(|record| record.status_view())
            .collect(),
    };

    output.emit(&listing, |listing| {
        let counts = listing.counts;
        println!(
            "{} applications | {} approved | {} pending | {} rejected | {:.0}% success",
            counts.total, counts.approved, counts.pending, counts.rejected, listing.success_rate
        );
        if listing.applications.is_empty() {
            println!("No applications match the current filters.");
        }
        for view in &listing.applications {
            println!(
                "- [{}] {} ({}) -> {} | applied {} | updated {}",
                view.application_id,
                view.scholarship_title,
                view.provider,
                view.status,
                view.applied_on,
                view.status_on,
            );
            if !view.notes.is_empty() {
                println!("    {}", view.notes);
            }
        }
    })
}

#[derive(Debug, Serialize)]
struct DashboardReport {
    snapshot: DashboardSnapshot,
    categories: Vec<CategoryShare>,
    monthly: Vec<MonthlyActivity>,
}

pub(crate) fn run_dashboard(session: &Session, output: Output) -> Result<(), AppError> {
    let report = DashboardReport {
        snapshot: session.dashboard(),
        categories: category_breakdown(session.tracker()),
        monthly: monthly_activity(session.tracker()),
    };

    output.emit(&report, |report| {
        let snapshot = &report.snapshot;
        println!("Welcome back, {}!", session.user().name);
        println!(
            "- {} scholarships available | {} applications | {} approved | {} pending",
            snapshot.total_scholarships,
            snapshot.applications.total,
            snapshot.applications.approved,
            snapshot.applications.pending
        );
        println!(
            "- Success rate {} | {} unread notifications",
            snapshot.success_rate_label, snapshot.unread_notifications
        );
        println!("Featured scholarships:");
        for featured in &snapshot.featured {
            println!(
                "  - {} ({}) {} due {}",
                featured.title, featured.provider, featured.amount, featured.deadline
            );
        }
        println!("Recent applications:");
        for view in &snapshot.recent_applications {
            println!(
                "  - {} ({}) -> {} | applied {}",
                view.scholarship_title, view.provider, view.status, view.applied_on
            );
        }
        println!("Applications by category:");
        for share in &report.categories {
            println!(
                "  - {}: {} ({}%)",
                share.category, share.count, share.percentage
            );
        }
        println!("Monthly activity:");
        for month in &report.monthly {
            println!(
                "  - {}: {} submitted, {} approved ({:.0}%)",
                month.month, month.applications, month.approved, month.approval_rate
            );
        }
    })
}

pub(crate) fn run_notifications(
    session: &mut Session,
    args: NotificationArgs,
    output: Output,
) -> Result<(), AppError> {
    for notice in apply_notification_actions(session.notifications_mut(), args) {
        output.notice(&notice)?;
    }

    let center = session.notifications();
    render_notifications(center.records(), center.unread_count(), output)
}

/// Apply the requested changes; each id that matched nothing yields a notice.
fn apply_notification_actions(
    center: &mut NotificationCenter,
    args: NotificationArgs,
) -> Vec<Notice> {
    let mut missing = Vec::new();
    for id in args.read.into_iter().map(NotificationId) {
        if !center.mark_read(&id) {
            missing.push(Notice::notification_not_found(&id));
        }
    }
    for id in args.delete.into_iter().map(NotificationId) {
        if center.delete(&id).is_none() {
            missing.push(Notice::notification_not_found(&id));
        }
    }
    if args.mark_all_read {
        center.mark_all_read();
    }
    if args.clear {
        center.clear_all();
    }
    missing
}

pub(crate) fn render_notifications(
    records: &[NotificationRecord],
    unread: usize,
    output: Output,
) -> Result<(), AppError> {
    let now = Utc::now();
    output.emit(records, |records| {
        if records.is_empty() {
            println!("No notifications. You're all caught up!");
            return;
        }
        println!("{} notifications ({} unread)", records.len(), unread);
        for record in records {
            println!(
                "{} [{}] {} ({}): {} | {}",
                if record.read { " " } else { "•" },
                record.id,
                record.title,
                record.kind.label(),
                record.message,
                time_ago(record.timestamp, now),
            );
        }
    })
}

pub(crate) async fn run_chat(
    session: &Session,
    args: ChatArgs,
    output: Output,
) -> Result<(), AppError> {
    let ChatArgs {
        messages,
        attach,
        export,
        clear,
    } = args;

    if clear {
        session.clear_chat();
        output.notice(&Notice::chat_cleared())?;
    }

    let mut attachment = match attach {
        Some(path) => {
            let file = inspect_file(&path)?;
            output.recover(session.attach(file.name, file.size_bytes, file.mime_type))?
        }
        None => None,
    };

    let mut pending = Vec::new();
    for message in &messages {
        if let Some(handle) = output.recover(session.send_chat(message, attachment.take()))? {
            pending.push(handle);
        }
    }
    for handle in pending {
        handle.await.map_err(std::io::Error::other)?;
    }

    let transcript: Vec<ChatMessage> = session
        .chat()
        .lock()
        .expect("transcript mutex poisoned")
        .messages()
        .to_vec();
    output.emit(&transcript, |messages| {
        for message in messages {
            println!(
                "[{}] {}: {}",
                message.timestamp.with_timezone(&Local).format("%-I:%M:%S %p"),
                message.sender.export_label(),
                message.content
            );
            if let Some(attachment) = &message.attachment {
                println!("    attached {} ({})", attachment.name, attachment.size_label());
            }
        }
    })?;

    if let Some(dir) = export {
        let path = session.export_chat(&dir, export_date(Utc::now()))?;
        output.notice(&Notice::info(
            Notice::chat_exported().title,
            format!("Saved to {}", path.display()),
        ))?;
    }

    Ok(())
}

/// Export files are named by the UTC calendar day.
pub(crate) fn export_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn center() -> NotificationCenter {
        let mut center = NotificationCenter::default();
        let at = Utc
            .with_ymd_and_hms(2024, 9, 15, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        center.push(NotificationKind::Info, "New match", "2 new scholarships", at);
        center.push(NotificationKind::Warning, "Deadline", "3 days left", at);
        center
    }

    #[test]
    fn unknown_notification_ids_are_reported() {
        let mut center = center();
        let notices = apply_notification_actions(
            &mut center,
            NotificationArgs {
                read: vec!["1".to_string(), "99".to_string()],
                delete: vec!["2".to_string(), "42".to_string()],
                ..NotificationArgs::default()
            },
        );

        let descriptions: Vec<_> = notices.iter().map(|n| n.description.as_str()).collect();
        assert_eq!(descriptions.len(), 2);
        assert!(descriptions[0].contains("99"));
        assert!(descriptions[1].contains("42"));
        assert_eq!(center.records().len(), 1);
        assert_eq!(center.unread_count(), 0);
    }

    #[test]
    fn known_ids_produce_no_notices() {
        let mut center = center();
        let notices = apply_notification_actions(
            &mut center,
            NotificationArgs {
                read: vec!["2".to_string()],
                mark_all_read: true,
                ..NotificationArgs::default()
            },
        );
        assert!(notices.is_empty());
        assert_eq!(center.unread_count(), 0);
    }

    #[test]
    fn status_filter_accepts_all_and_normalizes_case() {
        assert_eq!(parse_status_filter("all"), Ok(FieldFilter::Any));
        assert_eq!(
            parse_status_filter("REJECTED"),
            Ok(FieldFilter::exactly("rejected"))
        );
        assert!(parse_status_filter("archived").is_err());
    }

    #[test]
    fn export_date_is_the_utc_day() {
        let late = Utc
            .with_ymd_and_hms(2024, 9, 15, 23, 45, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(
            export_date(late),
            NaiveDate::from_ymd_opt(2024, 9, 15).expect("valid date")
        );
    }
}

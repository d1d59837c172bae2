use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Args;
use scholarbot::analytics::category_breakdown;
use scholarbot::applications::{ApplicationId, ApplicationStatus};
use scholarbot::discovery::{FieldFilter, ScholarshipId};
use scholarbot::error::AppError;
use scholarbot::notice::Notice;
use scholarbot::notifications::time_ago;
use scholarbot::profile::ProfileField;
use scholarbot::SessionError;

use crate::commands::export_date;
use crate::infra::{parse_date, Output, Session};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date stamped on the demo decision (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Write the chat transcript export into this directory.
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
    /// Skip the assistant chat portion of the demo.
    #[arg(long)]
    pub(crate) skip_chat: bool,
}

pub(crate) async fn run_demo(
    session: &mut Session,
    args: DemoArgs,
    output: Output,
) -> Result<(), AppError> {
    let DemoArgs {
        today,
        export_dir,
        skip_chat,
    } = args;
    let today = today.unwrap_or_else(|| export_date(Utc::now()));
    let decided_at = today.and_time(NaiveTime::MIN).and_utc();

    println!("ScholarBot demo for {}", session.user().name);
    let snapshot = session.dashboard();
    println!(
        "- {} scholarships | {} applications | success rate {}",
        snapshot.total_scholarships, snapshot.applications.total, snapshot.success_rate_label
    );

    println!("\nDiscovery: Technology scholarships mentioning \"tech\"");
    session
        .discovery_mut()
        .set_search("tech")
        .set_category(FieldFilter::exactly("Technology"));
    for record in session.discover() {
        println!("  - [{}] {} ({})", record.id, record.title, record.amount);
    }
    session.discovery_mut().clear();

    let bookmark = ScholarshipId("4".to_string());
    if let Some(change) = output.recover(session.toggle_bookmark(&bookmark))? {
        output.notice(&Notice::bookmark(change))?;
    }

    println!("\nApplications");
    let pending = session
        .tracker()
        .records()
        .iter()
        .find(|record| record.status == ApplicationStatus::Pending)
        .map(|record| record.id.clone());
    match pending {
        Some(id) => {
            if let Some(record) = output.recover(session.decide(
                &id,
                ApplicationStatus::Approved,
                "Funding confirmed for the coming term.",
                decided_at,
            ))? {
                println!(
                    "  - {} -> {} on {}",
                    record.scholarship.title,
                    record.status,
                    record.status_at.date_naive()
                );
            }
        }
        None => println!("  - no pending applications to decide"),
    }
    // Already approved, so this reports a notice instead of withdrawing.
    output.recover(session.withdraw(&ApplicationId("1".to_string())))?;

    let counts = session.tracker().counts();
    println!(
        "  {} approved | {} pending | {} rejected | {:.0}% success",
        counts.approved,
        counts.pending,
        counts.rejected,
        session.tracker().success_rate()
    );
    for share in category_breakdown(session.tracker()) {
        println!("  - {}: {}%", share.category, share.percentage);
    }

    println!("\nNotifications");
    let now = Utc::now();
    for record in session.notifications().records() {
        println!(
            "  {} {} | {}",
            if record.read { " " } else { "•" },
            record.title,
            time_ago(record.timestamp, now)
        );
    }
    session.notifications_mut().mark_all_read();
    println!(
        "  marked all read ({} unread)",
        session.notifications().unread_count()
    );

    println!("\nProfile");
    if output.recover(update_profile(session))?.is_some() {
        output.notice(&Notice::profile_updated())?;
        println!("  interests: {}", session.user().interests.join(", "));
    }

    if skip_chat {
        return Ok(());
    }

    println!("\nAssistant chat");
    if let Some(handle) =
        output.recover(session.send_chat("Which scholarships suit a CS major?", None))?
    {
        let reply = handle.await.map_err(std::io::Error::other)?;
        println!("  BOT: {}", reply.content);
    }
    if let Some(dir) = export_dir {
        let path = session.export_chat(&dir, today)?;
        output.notice(&Notice::info(
            Notice::chat_exported().title,
            format!("Saved to {}", path.display()),
        ))?;
    }

    Ok(())
}

fn update_profile(session: &mut Session) -> Result<(), SessionError> {
    let editor = session.profile_mut();
    editor.begin_edit()?;
    editor.set_field(ProfileField::Location, "Cambridge, MA")?;
    editor.add_interest("Machine Learning")?;
    editor.add_achievement("Dean's List 2024")?;
    editor.save()?;
    Ok(())
}

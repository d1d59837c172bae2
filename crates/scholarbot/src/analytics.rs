use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::applications::{
    ApplicationRecord, ApplicationStatus, ApplicationStatusView, ApplicationTracker, StatusCounts,
};
use crate::discovery::{featured, ScholarshipId, ScholarshipRecord};
use crate::notifications::NotificationCenter;

const FEATURED_LIMIT: usize = 3;
const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedScholarshipView {
    pub id: ScholarshipId,
    pub title: String,
    pub provider: String,
    pub amount: String,
    pub deadline: NaiveDate,
}

impl From<&ScholarshipRecord> for FeaturedScholarshipView {
    fn from(record: &ScholarshipRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            provider: record.provider.clone(),
            amount: record.amount.clone(),
            deadline: record.deadline,
        }
    }
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub total_scholarships: usize,
    pub applications: StatusCounts,
    pub success_rate: f64,
    pub success_rate_label: String,
    pub unread_notifications: usize,
    pub featured: Vec<FeaturedScholarshipView>,
    /// First applications on record, in tracker order.
    pub recent_applications: Vec<ApplicationStatusView>,
}

impl DashboardSnapshot {
    pub fn build(
        scholarships: &[ScholarshipRecord],
        tracker: &ApplicationTracker,
        notifications: &NotificationCenter,
    ) -> Self {
        let success_rate = tracker.success_rate();
        Self {
            total_scholarships: scholarships.len(),
            applications: tracker.counts(),
            success_rate,
            success_rate_label: format!("{success_rate:.0}%"),
            unread_notifications: notifications.unread_count(),
            featured: featured(scholarships, FEATURED_LIMIT)
                .into_iter()
                .map(FeaturedScholarshipView::from)
                .collect(),
            recent_applications: tracker
                .records()
                .iter()
                .take(RECENT_LIMIT)
                .map(ApplicationRecord::status_view)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub percentage: u32,
}

/// Applications per scholarship category, largest first, ties by name.
pub fn category_breakdown(tracker: &ApplicationTracker) -> Vec<CategoryShare> {
    let total = tracker.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in tracker.records() {
        *counts.entry(record.scholarship.category.as_str()).or_default() += 1;
    }

    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            count,
            percentage: ((count as f64 * 100.0) / total as f64).round() as u32,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    shares
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyActivity {
    /// `YYYY-MM` of the applied date.
    pub month: String,
    pub applications: usize,
    pub approved: usize,
    /// Percent of that month's applications approved; `0.0` for an empty month.
    pub approval_rate: f64,
}

fn approval_rate(applications: usize, approved: usize) -> f64 {
    if applications == 0 {
        return 0.0;
    }
    approved as f64 * 100.0 / applications as f64
}

/// Applications and approvals grouped by the month they were submitted, oldest first.
pub fn monthly_activity(tracker: &ApplicationTracker) -> Vec<MonthlyActivity> {
    let mut months: BTreeMap<(i32, u32), (usize, usize)> = BTreeMap::new();
    for record in tracker.records() {
        let applied = record.applied_at.date_naive();
        let entry = months.entry((applied.year(), applied.month())).or_default();
        entry.0 += 1;
        if record.status == ApplicationStatus::Approved {
            entry.1 += 1;
        }
    }

    months
        .into_iter()
        .map(|((year, month), (applications, approved))| MonthlyActivity {
            month: format!("{year:04}-{month:02}"),
            applications,
            approved,
            approval_rate: approval_rate(applications, approved),
        })
        .collect()
}

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::analytics::DashboardSnapshot;
use crate::applications::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationTracker, TrackerError,
};
use crate::auth::{AuthError, AuthFormError, Authenticator};
use crate::catalog::{CatalogError, CatalogSource};
use crate::chat::{Attachment, ChatMessage, ChatTranscript, SharedTranscript, SimulatedResponder};
use crate::config::AppConfig;
use crate::discovery::{BookmarkChange, BookmarkSet, ListQuery, ScholarshipId, ScholarshipRecord};
use crate::error::ValidationError;
use crate::notifications::{NotificationCenter, NotificationKind};
use crate::profile::{ProfileEditor, ProfileError, UserProfile};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("no scholarship with id {0}")]
    UnknownScholarship(ScholarshipId),
}

impl From<AuthFormError> for SessionError {
    fn from(err: AuthFormError) -> Self {
        match err {
            AuthFormError::Validation(inner) => Self::Validation(inner),
            AuthFormError::Auth(inner) => Self::Auth(inner),
        }
    }
}

/// Everything the signed-in student works with, created at sign-in and dropped at sign-out.
pub struct ScholarSession<A: Authenticator> {
    authenticator: A,
    scholarships: Vec<ScholarshipRecord>,
    discovery: ListQuery,
    bookmarks: BookmarkSet,
    tracker: ApplicationTracker,
    notifications: NotificationCenter,
    chat: SharedTranscript,
    responder: SimulatedResponder,
    max_attachment_bytes: u64,
    profile: ProfileEditor,
}

impl<A: Authenticator> ScholarSession<A> {
    pub fn init<S: CatalogSource + ?Sized>(
        source: &S,
        authenticator: A,
        identifier: &str,
        secret: &str,
        config: &AppConfig,
    ) -> Result<Self, SessionError> {
        let user = authenticator.login(identifier, secret)?;
        let catalog = source.load()?;
        info!(
            user = %user.email,
            scholarships = catalog.scholarships.len(),
            applications = catalog.applications.len(),
            "session started"
        );

        Ok(Self {
            authenticator,
            scholarships: catalog.scholarships,
            discovery: ListQuery::default(),
            bookmarks: BookmarkSet::default(),
            tracker: ApplicationTracker::new(catalog.applications),
            notifications: NotificationCenter::new(catalog.notifications),
            chat: ChatTranscript::new(catalog.chat_history).shared(),
            responder: SimulatedResponder::from_config(&config.chat),
            max_attachment_bytes: config.chat.max_attachment_bytes,
            profile: ProfileEditor::new(user),
        })
    }

    pub fn user(&self) -> &UserProfile {
        self.profile.profile()
    }

    pub fn profile(&self) -> &ProfileEditor {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut ProfileEditor {
        &mut self.profile
    }

    pub fn scholarships(&self) -> &[ScholarshipRecord] {
        &self.scholarships
    }

    pub fn scholarship(&self, id: &ScholarshipId) -> Option<&ScholarshipRecord> {
        self.scholarships.iter().find(|record| &record.id == id)
    }

    /// Search and filter state of the discovery list.
    pub fn discovery_mut(&mut self) -> &mut ListQuery {
        &mut self.discovery
    }

    pub fn discover(&self) -> Vec<&ScholarshipRecord> {
        self.discovery.apply(&self.scholarships)
    }

    pub fn toggle_bookmark(&mut self, id: &ScholarshipId) -> Result<BookmarkChange, SessionError> {
        if self.scholarship(id).is_none() {
            return Err(SessionError::UnknownScholarship(id.clone()));
        }
        Ok(self.bookmarks.toggle(id))
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn bookmarked(&self) -> Vec<&ScholarshipRecord> {
        self.scholarships
            .iter()
            .filter(|record| self.bookmarks.is_bookmarked(&record.id))
            .collect()
    }

    pub fn tracker(&self) -> &ApplicationTracker {
        &self.tracker
    }

    pub fn withdraw(&mut self, id: &ApplicationId) -> Result<ApplicationRecord, SessionError> {
        Ok(self.tracker.withdraw(id)?)
    }

    /// Decide a pending application and post a notification about it.
    pub fn decide(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
        notes: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, SessionError> {
        let record = self.tracker.set_status_at(id, status, notes, at)?.clone();

        let (kind, title, verb) = match record.status {
            ApplicationStatus::Approved => {
                (NotificationKind::Success, "Scholarship Approved!", "approved")
            }
            ApplicationStatus::Rejected => {
                (NotificationKind::Info, "Application Update", "not selected")
            }
            ApplicationStatus::Pending => {
                (NotificationKind::Info, "Application Update", "updated")
            }
        };
        self.notifications.push(
            kind,
            title,
            format!(
                "Your {} application has been {verb}.",
                record.scholarship.title
            ),
            record.status_at,
        );
        Ok(record)
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        DashboardSnapshot::build(&self.scholarships, &self.tracker, &self.notifications)
    }

    pub fn chat(&self) -> SharedTranscript {
        SharedTranscript::clone(&self.chat)
    }

    /// Attachment checked against the configured size ceiling.
    pub fn attach(
        &self,
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
    ) -> Result<Attachment, SessionError> {
        Ok(Attachment::new(
            name,
            size_bytes,
            mime_type,
            self.max_attachment_bytes,
        )?)
    }

    /// Record the user's message and schedule the assistant's reply.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_chat(
        &self,
        content: &str,
        attachment: Option<Attachment>,
    ) -> Result<JoinHandle<ChatMessage>, SessionError> {
        self.chat
            .lock()
            .expect("transcript mutex poisoned")
            .send(content, attachment, Utc::now())?;
        Ok(self.responder.schedule(SharedTranscript::clone(&self.chat)))
    }

    pub fn clear_chat(&self) {
        self.chat.lock().expect("transcript mutex poisoned").clear();
    }

    pub fn export_chat(&self, dir: &Path, date: NaiveDate) -> std::io::Result<PathBuf> {
        self.chat
            .lock()
            .expect("transcript mutex poisoned")
            .export_to(dir, date)
    }

    pub fn teardown(self) {
        self.authenticator.logout();
        info!(user = %self.profile.profile().email, "session closed");
    }
}

use serde::Serialize;

use crate::applications::TrackerError;
use crate::auth::AuthError;
use crate::discovery::BookmarkChange;
use crate::error::ValidationError;
use crate::notifications::NotificationId;
use crate::profile::ProfileError;
use crate::session::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Short-lived, non-blocking message shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn bookmark(change: BookmarkChange) -> Self {
        match change {
            BookmarkChange::Added => Self::info(
                "Scholarship bookmarked",
                "Scholarship saved to your list for later.",
            ),
            BookmarkChange::Removed => Self::info(
                "Bookmark removed",
                "Scholarship removed from your saved list.",
            ),
        }
    }

    pub fn withdrawn() -> Self {
        Self::info(
            "Application withdrawn",
            "Your scholarship application has been withdrawn successfully.",
        )
    }

    pub fn chat_exported() -> Self {
        Self::info(
            "Chat exported",
            "Your conversation has been downloaded as a text file.",
        )
    }

    pub fn chat_cleared() -> Self {
        Self::info("Chat cleared", "Your conversation has been reset.")
    }

    pub fn notification_not_found(id: &NotificationId) -> Self {
        Self::destructive(
            "Notification not found",
            format!("No notification with id {id}."),
        )
    }

    pub fn profile_updated() -> Self {
        Self::info(
            "Profile updated",
            "Your profile information has been successfully updated.",
        )
    }
}

impl From<&ValidationError> for Notice {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::MissingField { .. } => {
                Self::destructive("Registration failed", "Please fill in all required fields.")
            }
            ValidationError::EmptyMessage => {
                Self::destructive("Nothing to send", "Type a message or attach a file.")
            }
            ValidationError::AttachmentTooLarge { limit_bytes, .. } => Self::destructive(
                "File too large",
                format!(
                    "Please select a file smaller than {}.",
                    size_limit_label(*limit_bytes)
                ),
            ),
        }
    }
}

impl From<&SessionError> for Notice {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::Validation(inner) => inner.into(),
            SessionError::Auth(AuthError::InvalidCredentials) => {
                Self::destructive("Login failed", err.to_string())
            }
            SessionError::Tracker(TrackerError::InvalidTransition { .. }) => {
                Self::destructive("Action not allowed", err.to_string())
            }
            SessionError::Profile(ProfileError::NotEditing | ProfileError::AlreadyEditing) => {
                Self::destructive("Profile unchanged", err.to_string())
            }
            SessionError::UnknownScholarship(_) => {
                Self::destructive("Scholarship not found", err.to_string())
            }
            SessionError::Catalog(_) => {
                Self::destructive("Error", "Something went wrong. Please try again.")
            }
        }
    }
}

/// `5MB` for whole mebibytes, `512KB` for whole kibibytes, plain bytes otherwise.
fn size_limit_label(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

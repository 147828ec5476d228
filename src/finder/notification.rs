//! User-facing notifications (warning, progress and error dialogs)

use chrono::{DateTime, Local};

use crate::finder::errors::{ErrorKind, FinderError};

pub const PROGRESS_TITLE: &str = "Finding Stations...";
pub const PROGRESS_TEXT: &str = "Please wait while we find the nearest charging stations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Warning,
    Progress,
    Error,
}

/// A modal dialog with a title and body text
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: &str, text: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            text: text.to_string(),
            timestamp: Local::now(),
        }
    }

    pub fn progress() -> Self {
        Self::new(NotificationKind::Progress, PROGRESS_TITLE, PROGRESS_TEXT)
    }

    /// Validation failures become warnings, request failures become errors
    pub fn from_error(err: &FinderError) -> Self {
        let kind = match err.kind() {
            ErrorKind::Validation => NotificationKind::Warning,
            ErrorKind::Request => NotificationKind::Error,
        };
        Self::new(kind, err.title(), &err.to_string())
    }

    /// Progress dialogs block until the request settles
    pub fn is_dismissible(&self) -> bool {
        self.kind != NotificationKind::Progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_information_is_warning() {
        let note = Notification::from_error(&FinderError::MissingInformation);
        assert_eq!(note.kind, NotificationKind::Warning);
        assert_eq!(note.title, "Missing Information");
        assert_eq!(note.text, "Please enter both latitude and longitude.");
        assert!(note.is_dismissible());
    }

    #[test]
    fn test_request_failure_is_error() {
        let note = Notification::from_error(&FinderError::Status { status_code: 404 });
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.title, "Oops...");
        assert_eq!(note.text, "Failed to fetch stations");
    }

    #[test]
    fn test_progress_is_not_dismissible() {
        let note = Notification::progress();
        assert_eq!(note.title, PROGRESS_TITLE);
        assert!(!note.is_dismissible());
    }
}

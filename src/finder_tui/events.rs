//! Event handling for the finder TUI

use crate::finder::errors::FinderError;
use crate::models::SearchResultSet;

/// Events delivered to the UI loop from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A station search settled, successfully or not
    SearchFinished(Result<SearchResultSet, FinderError>),
}

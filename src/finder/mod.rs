//! Nearest charging station finder
//!
//! This module holds everything behind the finder screen: the search form,
//! the HTTP client for the nearest-stations service, the search cycle state
//! machine, and the text cards the results are rendered into.

pub mod client;
pub mod controller;
pub mod errors;
pub mod form;
pub mod notification;
pub mod render;

pub use client::{StationFinderClient, StationSource};
pub use controller::{FinderController, Phase};
pub use errors::{ErrorKind, FinderError};
pub use form::{FormField, SearchForm, TextInput};
pub use notification::{Notification, NotificationKind};
pub use render::{render_cards, render_text, StationCard};

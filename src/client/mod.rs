//! Client half of participant management: a delegated click handler that
//! unregisters participants and repaints the activity list.

pub mod delete_handler;
pub mod dom;
pub mod participants_api;
pub mod refresh;

pub use delete_handler::{DeleteClickHandler, UnregisterOutcome};
pub use dom::{ClickEvent, Document, Element};
pub use participants_api::{ClientError, ParticipantsApi};
pub use refresh::{ActivitiesRefresh, ActivitiesRefresher};

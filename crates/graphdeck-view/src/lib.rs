//! graphdeck View: view-models for the properties panel, document
//! table, edit flow, polling and toasts.

pub mod documents;
pub mod edit;
pub mod notify;
pub mod poller;
pub mod properties;

pub use documents::{trigger_scan, DocumentManager, SortDirection, SortField, SortSpec, StatusFilter};
pub use edit::{schedule_reload, EditSession, EditTarget, Editor, ReloadSignal, SaveOutcome};
pub use notify::{Notifier, Toast, ToastLevel};
pub use poller::{DocumentPoller, DocumentSource};
pub use properties::{current_entity, EntityView};

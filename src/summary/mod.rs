//! Summary pipeline
//!
//! Responsible for:
//! - Parsing action items out of generated markdown
//! - Caching summaries locally and in the remote store
//! - Orchestrating generation per meeting and summary type

mod cache;
mod models;
mod parser;
mod remote;
mod service;
mod session;

pub use cache::{local_key, SummaryCache};
pub use models::{ActionItem, StoredActionItem, StoredSummary, UNASSIGNED};
pub use parser::parse_action_items;
pub use remote::{RemoteSummaryStore, SupabaseSummaryStore};
pub use service::SummaryService;
pub use session::{MeetingContext, MeetingSession, SummaryState};

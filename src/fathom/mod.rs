//! Recording platform (Fathom) client

mod client;
mod models;

pub use client::FathomClient;
pub use models::{
    Attendee, EmbedData, FathomActionItem, FathomAttendee, FathomListResponse, FathomMeeting,
    FathomPerson, FathomSummary, FathomTranscriptItem, MeetingData, TranscriptLine,
    NO_PLATFORM_SUMMARY,
};

//! TUI screens

mod detail;
mod meetings;

pub use detail::{DetailScreen, DetailTab};
pub use meetings::MeetingsScreen;

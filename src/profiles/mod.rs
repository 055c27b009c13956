//! Summary profiles
//!
//! Maps a summary type id to the framework instruction that steers generation.

mod builtin;
mod models;
mod registry;

pub use builtin::BuiltInType;
pub use models::{NewProfile, ProfileUpdate, SummaryProfile};
pub use registry::{ProfileRegistry, GENERIC_INSTRUCTION};

//! Authentication
//!
//! The OAuth flow itself happens in the provider; this module only verifies
//! an access token and remembers the resulting session on this device.

mod client;
mod session;

pub use client::AuthClient;
pub use session::{Session, SessionStore};

//! Bank account entity and its lock-token protocol.
//!
//! An account is marked busy by a caller-held token rather than by an open
//! connection: acquiring the lock hands out a fresh secret, and every later
//! unlock or balance write must present it (or the administrative force
//! override). Conflicts are detected at the next write.

pub mod types;

pub use types::{Account, AccountView};

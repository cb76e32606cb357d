//! In-memory implementations of the meeting and snapshot store ports.
//!
//! State lives for the lifetime of the process.

mod meetings;
mod snapshots;

pub use meetings::InMemoryMeetingStore;
pub use snapshots::InMemorySnapshotStore;

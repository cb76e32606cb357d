//! Domain types and models

pub mod meeting;
pub mod report;
pub mod window;

pub use meeting::{ClassifiedMeeting, MatchPolicy, MeetingStatus, ScheduledMeeting, SessionRecord};
pub use report::{
    AlertEvent, AlertKind, AnalysisReport, LateDetail, NoParticipationDetail, NotStartedDetail,
    StatsSnapshot,
};
pub use window::{DateWindow, ResolvedWindow};

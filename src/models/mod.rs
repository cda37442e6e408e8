//! Transport types for the portal API.
//!
//! The gateway forwards bodies verbatim, so these types only cover what it
//! inspects: closed enumerations, filter queries and the user profile kept
//! in the client session.

mod filter;
mod job;
mod submission;
mod user;

pub use filter::{EventFilter, JobFilter, MonthYearFilter};
pub use job::{JobType, WorkType};
pub use submission::SubmissionStatus;
pub use user::{Profile, User};

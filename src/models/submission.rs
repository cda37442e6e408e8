//! Referral submission review states.

use serde::Serialize;

/// Decision a referrer can record on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub const INVALID_MESSAGE: &'static str =
        "Invalid status value. Must be 'accepted' or 'rejected'";
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Unknown submission status: {}", s)),
        }
    }
}

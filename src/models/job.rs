//! Job posting enumerations.

/// Employment type of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Fulltime,
    Parttime,
    Internship,
    Others,
}

impl JobType {
    pub const INVALID_MESSAGE: &'static str =
        "Type must be either 'fulltime', 'parttime', 'internship', or 'others'";
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fulltime" => Ok(Self::Fulltime),
            "parttime" => Ok(Self::Parttime),
            "internship" => Ok(Self::Internship),
            "others" => Ok(Self::Others),
            _ => Err(format!("Unknown job type: {}", s)),
        }
    }
}

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkType {
    Onsite,
    Remote,
    Hybrid,
}

impl WorkType {
    pub const INVALID_MESSAGE: &'static str =
        "WorkType must be either 'onsite', 'remote', or 'hybrid'";
}

impl std::str::FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onsite" => Ok(Self::Onsite),
            "remote" => Ok(Self::Remote),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("Unknown work type: {}", s)),
        }
    }
}

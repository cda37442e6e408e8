//! Query strings accepted by the filter endpoints.

use serde::Deserialize;

use crate::error::Result;
use crate::services::validation::{check_month, check_year};

/// `?month=&year=` as used by the referral filter.
#[derive(Debug, Default, Deserialize)]
pub struct MonthYearFilter {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl MonthYearFilter {
    pub fn validate(&self) -> Result<()> {
        check_month(self.month.as_deref())?;
        check_year(self.year.as_deref())
    }

    pub fn params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![("month", self.month.clone()), ("year", self.year.clone())]
    }
}

/// Job filter: month/year plus posting attributes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    pub month: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub work_type: Option<String>,
    pub batch: Option<String>,
}

impl JobFilter {
    pub fn validate(&self) -> Result<()> {
        check_month(self.month.as_deref())?;
        check_year(self.year.as_deref())
    }

    pub fn params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("month", self.month.clone()),
            ("year", self.year.clone()),
            ("type", self.job_type.clone()),
            ("workType", self.work_type.clone()),
            ("batch", self.batch.clone()),
        ]
    }
}

/// Event filter.
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub month: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl EventFilter {
    pub fn validate(&self) -> Result<()> {
        check_month(self.month.as_deref())?;
        check_year(self.year.as_deref())
    }

    pub fn params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("month", self.month.clone()),
            ("year", self.year.clone()),
            ("type", self.event_type.clone()),
        ]
    }
}

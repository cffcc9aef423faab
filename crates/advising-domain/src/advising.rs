//! Advising sheet types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review state of an advising sheet.
///
/// Wire format: `"Pending"`, `"Approved"`, `"Rejected"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisingStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdvisingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Only pending sheets may be edited by the student.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for AdvisingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown advising status: {0}")]
pub struct UnknownAdvisingStatus(pub String);

impl FromStr for AdvisingStatus {
    type Err = UnknownAdvisingStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(UnknownAdvisingStatus(other.to_owned())),
        }
    }
}

/// One line of a prerequisite list or course plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry {
    pub level: i32,
    pub course_name: String,
}

impl CourseEntry {
    pub fn is_well_formed(&self) -> bool {
        self.level > 0 && !self.course_name.trim().is_empty()
    }
}

/// Names in `plan` that also appear in `taken`, compared case-insensitively.
///
/// Result is lowercase, deduplicated, in plan order.
pub fn previously_taken(plan: &[CourseEntry], taken: &[String]) -> Vec<String> {
    let taken: Vec<String> = taken.iter().map(|t| t.trim().to_lowercase()).collect();
    let mut found: Vec<String> = Vec::new();
    for entry in plan {
        let name = entry.course_name.trim().to_lowercase();
        if taken.contains(&name) && !found.contains(&name) {
            found.push(name);
        }
    }
    found
}

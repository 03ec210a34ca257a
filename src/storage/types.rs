//! Survey Record Types
//!
//! Defines the strongly-typed survey response as it flows through the system.
//! A `Submission` is what the validator produces from an untyped request body;
//! a `SubmissionRecord` is a submission that the store has accepted and stamped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated survey response that has not been persisted yet.
///
/// Produced only by `validation::validate`, so every field already satisfies
/// the required-field and range rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    /// Respondent age, 10..=100.
    pub age: u8,
    pub gender: String,
    pub experience: String,
    /// Selected training goals in the order they were submitted, without duplicates.
    pub goals: Vec<String>,
    /// Training sessions per week, 1..=14.
    pub frequency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// A single persisted survey response.
///
/// The `timestamp` is assigned by the store at append time and is never
/// taken from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub submission: Submission,
    pub timestamp: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn new(submission: Submission, timestamp: DateTime<Utc>) -> Self {
        Self {
            submission,
            timestamp,
        }
    }
}

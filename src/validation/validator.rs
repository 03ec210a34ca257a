use crate::storage::types::Submission;

use serde_json::Value;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted respondent ages.
pub const AGE_RANGE: RangeInclusive<i64> = 10..=100;
/// Accepted training sessions per week.
pub const FREQUENCY_RANGE: RangeInclusive<i64> = 1..=14;

/// Reason a submission was rejected. The display text is sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing name")]
    MissingName,
    #[error("invalid age range")]
    InvalidAge,
    #[error("missing gender")]
    MissingGender,
    #[error("missing experience level")]
    MissingExperience,
    #[error("no goals selected")]
    NoGoals,
    #[error("invalid frequency range")]
    InvalidFrequency,
}

/// Checks a raw request body and builds a typed submission from it.
///
/// Short-circuits on the first failing rule. Unknown fields are ignored and
/// `comments` never causes a rejection.
pub fn validate(raw: &Value) -> Result<Submission, ValidationError> {
    let name = non_blank_text(raw.get("name")).ok_or(ValidationError::MissingName)?;
    let age = integer_in(raw.get("age"), &AGE_RANGE).ok_or(ValidationError::InvalidAge)?;
    let gender = non_blank_text(raw.get("gender")).ok_or(ValidationError::MissingGender)?;
    let experience =
        non_blank_text(raw.get("experience")).ok_or(ValidationError::MissingExperience)?;
    let goals = goal_set(raw.get("goals")).ok_or(ValidationError::NoGoals)?;
    let frequency = integer_in(raw.get("frequency"), &FREQUENCY_RANGE)
        .ok_or(ValidationError::InvalidFrequency)?;

    let comments = match raw.get("comments") {
        Some(Value::String(text)) => Some(text.clone()),
        _ => None,
    };

    Ok(Submission {
        name,
        age,
        gender,
        experience,
        goals,
        frequency,
        comments,
    })
}

fn non_blank_text(value: Option<&Value>) -> Option<String> {
    value?
        .as_str()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Accepts JSON integers and strings holding an integer (HTML forms post numbers as text).
fn integer_in(value: Option<&Value>, range: &RangeInclusive<i64>) -> Option<u8> {
    let n = match value? {
        Value::Number(n) => n.as_i64()?,
        Value::String(text) => text.trim().parse::<i64>().ok()?,
        _ => return None,
    };

    if range.contains(&n) {
        u8::try_from(n).ok()
    } else {
        None
    }
}

/// Goals must be an array of strings. Blank entries are dropped and duplicates
/// collapse onto their first occurrence.
fn goal_set(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;

    let mut goals: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let goal = item.as_str()?;
        if goal.trim().is_empty() || goals.iter().any(|g| g == goal) {
            continue;
        }
        goals.push(goal.to_string());
    }

    if goals.is_empty() { None } else { Some(goals) }
}

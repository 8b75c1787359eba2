use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::machine::changed;

/// Day names accepted in a plan's `days` field, in week order
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Nested trainee summary embedded in a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trainee {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Workout plan assigned to a trainee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub id: i64,
    pub trainee: Trainee,
    #[serde(default)]
    pub trainee_name: String,
    pub description: String,
    /// Comma-separated machine IDs
    pub machines: String,
    /// Comma-separated day names
    pub days: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Plan {
    pub fn machine_ids(&self) -> Vec<i64> {
        split_ids(&self.machines)
    }

    pub fn day_names(&self) -> Vec<String> {
        split_list(&self.days)
    }

    pub fn trainee_display(&self) -> String {
        if self.trainee_name.trim().is_empty() {
            self.trainee.username.clone()
        } else {
            self.trainee_name.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanRequest {
    pub trainee_id: i64,
    pub description: String,
    pub machines: String,
    pub days: String,
    pub sets: u32,
    pub reps: u32,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machines: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// `Some(None)` clears the duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<Option<u32>>,
}

impl PlanUpdate {
    /// Fields of `request` that differ from `existing`
    pub fn changes(existing: &Plan, request: &PlanRequest) -> Self {
        Self {
            trainee_id: changed(&existing.trainee.id, &request.trainee_id),
            description: changed(&existing.description, &request.description),
            machines: changed(&existing.machines, &request.machines),
            days: changed(&existing.days, &request.days),
            sets: changed(&existing.sets, &request.sets),
            reps: changed(&existing.reps, &request.reps),
            duration_minutes: changed(&existing.duration_minutes, &request.duration_minutes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// `[1, 3, 5]` -> `"1,3,5"`
pub fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// `"1, 3,x,5"` -> `[1, 3, 5]`; unparsable entries are dropped
pub fn split_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gym equipment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machine {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MachineRequest {
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MachineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MachineUpdate {
    /// Fields of `request` that differ from `existing`
    pub fn changes(existing: &Machine, request: &MachineRequest) -> Self {
        Self {
            code: changed(&existing.code, &request.code),
            name: changed(&existing.name, &request.name),
            description: changed(&existing.description, &request.description),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

pub(crate) fn changed<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
    if old == new {
        None
    } else {
        Some(new.clone())
    }
}

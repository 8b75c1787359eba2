use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trainer profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trainer {
    pub id: i64,
    pub user: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub specialization: String,
    pub experience_years: u32,
    #[serde(default)]
    pub bio: Option<String>,
    pub hourly_rate: String,
    pub is_available: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trainer {
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        let full = format!("{} {}", first, last);
        let full = full.trim();

        if !full.is_empty() {
            full.to_string()
        } else if let Some(username) = &self.username {
            username.clone()
        } else {
            format!("trainer #{}", self.id)
        }
    }
}

/// Creates the user account and the trainer profile in one call
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrainerCreateRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub password: String,
    pub specialization: String,
    pub experience_years: u32,
    pub hourly_rate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TrainerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    Basic,
    Premium,
    Vip,
}

impl MembershipType {
    pub const ALL: [MembershipType; 3] = [
        MembershipType::Basic,
        MembershipType::Premium,
        MembershipType::Vip,
    ];
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipType::Basic => write!(f, "basic"),
            MembershipType::Premium => write!(f, "premium"),
            MembershipType::Vip => write!(f, "vip"),
        }
    }
}

impl std::str::FromStr for MembershipType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(MembershipType::Basic),
            "premium" => Ok(MembershipType::Premium),
            "vip" => Ok(MembershipType::Vip),
            _ => Err(anyhow::anyhow!("Invalid membership type: {}", s)),
        }
    }
}

/// Gym member record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
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
    pub membership_type: MembershipType,
    pub membership_start_date: NaiveDate,
    pub membership_end_date: NaiveDate,
    pub is_active: bool,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Member {
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
            format!("member #{}", self.id)
        }
    }
}

/// Creates the user account and the member profile in one call
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MemberCreateRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub password: String,
    pub membership_type: MembershipType,
    pub membership_start_date: NaiveDate,
    pub membership_end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<MembershipType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
}

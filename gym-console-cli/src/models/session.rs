use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::machine::changed;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Personal,
    Group,
    Class,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [SessionType::Personal, SessionType::Group, SessionType::Class];
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionType::Personal => write!(f, "personal"),
            SessionType::Group => write!(f, "group"),
            SessionType::Class => write!(f, "class"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 3] = [
        SessionStatus::Scheduled,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
    ];
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Scheduled => write!(f, "scheduled"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Scheduled trainer/member appointment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingSession {
    pub id: i64,
    pub trainer: i64,
    #[serde(default)]
    pub trainer_name: Option<String>,
    pub member: i64,
    #[serde(default)]
    pub member_name: Option<String>,
    pub session_type: SessionType,
    pub scheduled_date: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: SessionStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub price: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TrainingSession {
    pub fn local_start(&self) -> DateTime<Local> {
        self.scheduled_date.with_timezone(&Local)
    }

    /// Whether the session starts on `date` in local time
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.local_start().date_naive() == date
    }

    pub fn trainer_label(&self) -> String {
        self.trainer_name
            .clone()
            .unwrap_or_else(|| format!("trainer #{}", self.trainer))
    }

    pub fn member_label(&self) -> String {
        self.member_name
            .clone()
            .unwrap_or_else(|| format!("member #{}", self.member))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionRequest {
    pub trainer: i64,
    pub member: i64,
    pub session_type: SessionType,
    pub scheduled_date: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: SessionStatus,
    pub notes: String,
    pub price: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_type: Option<SessionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl SessionUpdate {
    /// Fields of `request` that differ from `existing`
    pub fn changes(existing: &TrainingSession, request: &SessionRequest) -> Self {
        let old_notes = existing.notes.clone().unwrap_or_default();
        let same_price = match (existing.price.parse::<f64>(), request.price.parse::<f64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => existing.price == request.price,
        };

        Self {
            trainer: changed(&existing.trainer, &request.trainer),
            member: changed(&existing.member, &request.member),
            session_type: changed(&existing.session_type, &request.session_type),
            scheduled_date: changed(&existing.scheduled_date, &request.scheduled_date),
            duration_minutes: changed(&existing.duration_minutes, &request.duration_minutes),
            status: changed(&existing.status, &request.status),
            notes: changed(&old_notes, &request.notes),
            price: if same_price {
                None
            } else {
                Some(request.price.clone())
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

//! Dashboard aggregation over the member, trainer and session lists.

use chrono::NaiveDate;
use std::cmp::Reverse;

use crate::api::{ApiError, Members, ResourceClient, Sessions, Trainers};
use crate::models::{Member, SessionStatus, Trainer, TrainingSession};

pub const UPCOMING_LIMIT: usize = 5;
pub const RECENT_MEMBERS_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_members: usize,
    pub total_trainers: usize,
    pub total_sessions: usize,
    /// Sessions completed today (local date)
    pub todays_attendance: usize,
    /// First scheduled sessions, in list order
    pub upcoming_sessions: Vec<TrainingSession>,
    /// Most recently created members first
    pub recent_members: Vec<Member>,
    /// Lists that failed to load, with the error text
    pub load_errors: Vec<String>,
}

impl DashboardSummary {
    pub fn from_lists(
        members: &[Member],
        trainers: &[Trainer],
        sessions: &[TrainingSession],
        today: NaiveDate,
    ) -> Self {
        let todays_attendance = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed && s.is_on(today))
            .count();

        let upcoming_sessions = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Scheduled)
            .take(UPCOMING_LIMIT)
            .cloned()
            .collect();

        let mut recent_members = members.to_vec();
        recent_members.sort_by_key(|m| Reverse(m.created_at));
        recent_members.truncate(RECENT_MEMBERS_LIMIT);

        Self {
            total_members: members.len(),
            total_trainers: trainers.len(),
            total_sessions: sessions.len(),
            todays_attendance,
            upcoming_sessions,
            recent_members,
            load_errors: Vec::new(),
        }
    }

    /// Fetch the three lists concurrently. A failed list is logged and its
    /// section keeps the default.
    pub async fn load(
        members: &ResourceClient<Members>,
        trainers: &ResourceClient<Trainers>,
        sessions: &ResourceClient<Sessions>,
        today: NaiveDate,
    ) -> Self {
        let summary = Self::fetch(members, trainers, sessions, today).await;
        for error in &summary.load_errors {
            tracing::error!("Error loading {}", error);
        }
        summary
    }

    /// Like [`load`](Self::load), but failures are only recorded in
    /// `load_errors`. Used while the terminal dashboard owns the screen.
    pub async fn fetch(
        members: &ResourceClient<Members>,
        trainers: &ResourceClient<Trainers>,
        sessions: &ResourceClient<Sessions>,
        today: NaiveDate,
    ) -> Self {
        let (members, trainers, sessions) =
            tokio::join!(members.list(), trainers.list(), sessions.list());

        let mut load_errors = Vec::new();
        let members = or_empty(members, "members", &mut load_errors);
        let trainers = or_empty(trainers, "trainers", &mut load_errors);
        let sessions = or_empty(sessions, "sessions", &mut load_errors);

        Self {
            load_errors,
            ..Self::from_lists(&members, &trainers, &sessions, today)
        }
    }
}

fn or_empty<T>(
    result: Result<Vec<T>, ApiError>,
    what: &str,
    errors: &mut Vec<String>,
) -> Vec<T> {
    result.unwrap_or_else(|e| {
        errors.push(format!("{}: {}", what, e));
        Vec::new()
    })
}

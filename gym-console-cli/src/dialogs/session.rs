use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use colored::Colorize;
use validator::Validate;

use super::{
    finite_amount, prompt_choice, prompt_date, prompt_parsed, prompt_reference, prompt_text,
    Choice, Form, Prompter,
};
use crate::api::{Members, ResourceClient, Trainers};
use crate::models::{SessionRequest, SessionStatus, SessionType, TrainingSession};

const DEFAULT_TIME: &str = "09:00";

/// Combine a calendar date and an `HH:MM` wall-clock time in the local time
/// zone into a UTC instant
pub fn compose_scheduled_date(date: NaiveDate, time: &str) -> Result<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{}', expected HH:MM", time))?;

    let local = Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .with_context(|| format!("{} {} does not exist in the local time zone", date, time))?;

    Ok(local.with_timezone(&Utc))
}

/// Reference lists the session form selects from
#[derive(Debug, Clone, Default)]
pub struct SessionDialog {
    pub trainers: Vec<Choice>,
    pub members: Vec<Choice>,
}

impl SessionDialog {
    /// Fetch trainers and members. A failed list is logged and left empty.
    pub async fn load(
        trainers: &ResourceClient<Trainers>,
        members: &ResourceClient<Members>,
    ) -> Self {
        let (trainers, members) = tokio::join!(trainers.list(), members.list());

        let trainers = match trainers {
            Ok(trainers) => trainers
                .iter()
                .map(|t| Choice {
                    id: t.id,
                    label: format!("{} - {}", t.display_name(), t.specialization),
                })
                .collect(),
            Err(e) => {
                tracing::error!("Error loading trainers: {}", e);
                Vec::new()
            }
        };

        let members = match members {
            Ok(members) => members
                .iter()
                .map(|m| Choice {
                    id: m.id,
                    label: m.display_name(),
                })
                .collect(),
            Err(e) => {
                tracing::error!("Error loading members: {}", e);
                Vec::new()
            }
        };

        Self { trainers, members }
    }

    /// Form pre-filled from `existing`, or a 60 minute personal session
    /// today at 09:00 priced 50
    pub fn form(&self, existing: Option<&TrainingSession>, today: NaiveDate) -> SessionForm {
        let mut form = SessionForm {
            trainer: None,
            member: None,
            session_type: SessionType::Personal,
            date: today,
            time: DEFAULT_TIME.to_string(),
            duration_minutes: 60,
            status: SessionStatus::Scheduled,
            notes: String::new(),
            price: 50.0,
            trainer_options: self.trainers.clone(),
            member_options: self.members.clone(),
        };

        if let Some(session) = existing {
            let start = session.local_start();
            form.trainer = Some(session.trainer);
            form.member = Some(session.member);
            form.session_type = session.session_type;
            form.date = start.date_naive();
            form.time = start.format("%H:%M").to_string();
            form.duration_minutes = session.duration_minutes;
            form.status = session.status;
            form.notes = session.notes.clone().unwrap_or_default();
            form.price = session.price.parse().unwrap_or(50.0);
        }

        form
    }
}

#[derive(Debug, Clone, Validate)]
pub struct SessionForm {
    #[validate(required(message = "Trainer is required"))]
    pub trainer: Option<i64>,

    #[validate(required(message = "Member is required"))]
    pub member: Option<i64>,

    pub session_type: SessionType,
    pub date: NaiveDate,

    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,

    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: u32,

    pub status: SessionStatus,
    pub notes: String,

    #[validate(
        range(min = 0.0, message = "Price cannot be negative"),
        custom(function = "finite_amount")
    )]
    pub price: f64,

    pub trainer_options: Vec<Choice>,
    pub member_options: Vec<Choice>,
}

impl SessionForm {
    fn collect_time(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        loop {
            let answer = prompt_text(prompter, "Time (HH:MM)", &self.time)?;
            if NaiveTime::parse_from_str(&answer, "%H:%M").is_ok() {
                self.time = answer;
                return Ok(());
            }
            println!("  {} Use the HH:MM format", "✗".red());
        }
    }
}

impl Form for SessionForm {
    type Payload = SessionRequest;

    fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        self.trainer = prompt_reference(prompter, "Trainer", &self.trainer_options, self.trainer)?;
        self.member = prompt_reference(prompter, "Member", &self.member_options, self.member)?;
        self.session_type =
            prompt_choice(prompter, "Session type", &SessionType::ALL, self.session_type)?;
        self.date = prompt_date(prompter, "Date (YYYY-MM-DD)", self.date)?;
        self.collect_time(prompter)?;
        self.duration_minutes =
            prompt_parsed(prompter, "Duration (minutes)", &self.duration_minutes)?;
        self.status = prompt_choice(prompter, "Status", &SessionStatus::ALL, self.status)?;
        self.notes = prompt_text(prompter, "Notes", &self.notes)?;
        self.price = prompt_parsed(prompter, "Price", &self.price)?;
        Ok(())
    }

    fn into_payload(self) -> Result<SessionRequest> {
        let trainer = self
            .trainer
            .ok_or_else(|| anyhow::anyhow!("Trainer is required"))?;
        let member = self
            .member
            .ok_or_else(|| anyhow::anyhow!("Member is required"))?;

        Ok(SessionRequest {
            trainer,
            member,
            session_type: self.session_type,
            scheduled_date: compose_scheduled_date(self.date, &self.time)?,
            duration_minutes: self.duration_minutes,
            status: self.status,
            notes: self.notes,
            price: self.price.to_string(),
        })
    }
}

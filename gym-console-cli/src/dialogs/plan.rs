use anyhow::Result;
use validator::Validate;

use super::{prompt_optional, prompt_parsed, prompt_reference, prompt_text, Choice, Form, Prompter};
use crate::api::{Machines, Members, ResourceClient};
use crate::models::plan::{join_ids, split_ids, WEEKDAYS};
use crate::models::{Plan, PlanRequest};

/// Reference lists the plan form selects from
#[derive(Debug, Clone, Default)]
pub struct PlanDialog {
    pub trainees: Vec<Choice>,
    pub machines: Vec<Choice>,
}

impl PlanDialog {
    /// Fetch trainees and machines. A failed list is logged and left empty.
    pub async fn load(
        members: &ResourceClient<Members>,
        machines: &ResourceClient<Machines>,
    ) -> Self {
        let (members, machines) = tokio::join!(members.list(), machines.list());

        let trainees = match members {
            Ok(members) => members
                .iter()
                .map(|m| Choice {
                    id: m.user,
                    label: m.display_name(),
                })
                .collect(),
            Err(e) => {
                tracing::error!("Error loading members: {}", e);
                Vec::new()
            }
        };

        let machines = match machines {
            Ok(machines) => machines
                .iter()
                .map(|m| Choice {
                    id: m.id,
                    label: format!("{} ({})", m.name, m.code),
                })
                .collect(),
            Err(e) => {
                tracing::error!("Error loading machines: {}", e);
                Vec::new()
            }
        };

        Self { trainees, machines }
    }

    /// Form pre-filled from `existing`, or with 3 sets of 15 reps
    pub fn form(&self, existing: Option<&Plan>) -> PlanForm {
        let mut form = PlanForm {
            trainee_id: None,
            description: String::new(),
            days: Vec::new(),
            machines: Vec::new(),
            sets: 3,
            reps: 15,
            duration_minutes: None,
            trainee_options: self.trainees.clone(),
            machine_options: self.machines.clone(),
        };

        if let Some(plan) = existing {
            form.trainee_id = Some(plan.trainee.id);
            form.description = plan.description.clone();
            form.days = plan.day_names();
            form.machines = plan.machine_ids();
            form.sets = plan.sets;
            form.reps = plan.reps;
            form.duration_minutes = plan.duration_minutes;
        }

        form
    }
}

#[derive(Debug, Clone, Validate)]
pub struct PlanForm {
    #[validate(required(message = "Trainee is required"))]
    pub trainee_id: Option<i64>,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Select at least one day"))]
    pub days: Vec<String>,

    #[validate(length(min = 1, message = "Select at least one machine"))]
    pub machines: Vec<i64>,

    #[validate(range(min = 1, message = "Sets must be at least 1"))]
    pub sets: u32,

    #[validate(range(min = 1, message = "Reps must be at least 1"))]
    pub reps: u32,

    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration_minutes: Option<u32>,

    pub trainee_options: Vec<Choice>,
    pub machine_options: Vec<Choice>,
}

impl PlanForm {
    fn collect_days(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        let labels: Vec<String> = WEEKDAYS.iter().map(|d| d.to_string()).collect();
        let defaults: Vec<bool> = WEEKDAYS
            .iter()
            .map(|day| self.days.iter().any(|d| d.eq_ignore_ascii_case(day)))
            .collect();

        let picked = prompter.multi_select("Days", &labels, &defaults)?;
        self.days = picked.into_iter().map(|i| labels[i].clone()).collect();
        Ok(())
    }

    fn collect_machines(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        if self.machine_options.is_empty() {
            let current = join_ids(&self.machines);
            let answer = prompt_text(prompter, "Machine IDs (comma-separated)", &current)?;
            self.machines = split_ids(&answer);
            return Ok(());
        }

        let labels: Vec<String> = self
            .machine_options
            .iter()
            .map(|c| format!("{} (#{})", c.label, c.id))
            .collect();
        let defaults: Vec<bool> = self
            .machine_options
            .iter()
            .map(|c| self.machines.contains(&c.id))
            .collect();

        let picked = prompter.multi_select("Machines", &labels, &defaults)?;
        self.machines = picked
            .into_iter()
            .map(|i| self.machine_options[i].id)
            .collect();
        Ok(())
    }
}

impl Form for PlanForm {
    type Payload = PlanRequest;

    fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        self.trainee_id =
            prompt_reference(prompter, "Trainee", &self.trainee_options, self.trainee_id)?;
        self.description = prompt_text(prompter, "Description", &self.description)?;
        self.collect_days(prompter)?;
        self.collect_machines(prompter)?;
        self.sets = prompt_parsed(prompter, "Sets", &self.sets)?;
        self.reps = prompt_parsed(prompter, "Reps", &self.reps)?;
        self.duration_minutes = prompt_optional(
            prompter,
            "Duration in minutes (blank or - for none)",
            self.duration_minutes,
        )?;
        Ok(())
    }

    fn into_payload(self) -> Result<PlanRequest> {
        let trainee_id = self
            .trainee_id
            .ok_or_else(|| anyhow::anyhow!("Trainee is required"))?;

        Ok(PlanRequest {
            trainee_id,
            description: self.description,
            machines: join_ids(&self.machines),
            days: self.days.join(","),
            sets: self.sets,
            reps: self.reps,
            duration_minutes: self.duration_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PlanForm {
        let mut form = PlanDialog::default().form(None);
        form.trainee_id = Some(9);
        form.description = "Upper body".to_string();
        form.days = vec!["Monday".to_string(), "Friday".to_string()];
        form.machines = vec![1, 3, 5];
        form
    }

    #[test]
    fn test_defaults() {
        let form = PlanDialog::default().form(None);
        assert_eq!(form.sets, 3);
        assert_eq!(form.reps, 15);
        assert!(form.duration_minutes.is_none());
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_payload_joins_ids_and_days() {
        let payload = form().into_payload().unwrap();
        assert_eq!(payload.machines, "1,3,5");
        assert_eq!(payload.days, "Monday,Friday");
        assert_eq!(payload.trainee_id, 9);
    }

    #[test]
    fn test_minimums() {
        assert!(form().validate().is_ok());

        let mut bad = form();
        bad.sets = 0;
        assert!(bad.validate().is_err());

        let mut bad = form();
        bad.duration_minutes = Some(0);
        assert!(bad.validate().is_err());

        let mut bad = form();
        bad.machines.clear();
        assert!(bad.validate().is_err());
    }
}

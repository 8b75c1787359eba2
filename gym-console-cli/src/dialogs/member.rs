use anyhow::Result;
use chrono::{Months, NaiveDate};
use validator::Validate;

use super::{non_empty, prompt_choice, prompt_date, prompt_text, Form, Prompter};
use crate::models::{MemberCreateRequest, MembershipType};

/// New member: user account plus membership
#[derive(Debug, Clone, Validate)]
pub struct MemberForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    pub first_name: String,
    pub last_name: String,

    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,

    pub membership_type: MembershipType,
    pub membership_start_date: NaiveDate,
    pub membership_end_date: NaiveDate,
    pub emergency_contact: String,
    pub medical_conditions: String,
    pub is_active: bool,
}

impl MemberForm {
    /// Basic tier, starting `today` and running one year
    pub fn new(today: NaiveDate) -> Self {
        let one_year_later = today.checked_add_months(Months::new(12)).unwrap_or(today);

        Self {
            username: String::new(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password: String::new(),
            membership_type: MembershipType::Basic,
            membership_start_date: today,
            membership_end_date: one_year_later,
            emergency_contact: String::new(),
            medical_conditions: String::new(),
            is_active: true,
        }
    }
}

impl Form for MemberForm {
    type Payload = MemberCreateRequest;

    fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        self.username = prompt_text(prompter, "Username", &self.username)?;
        self.email = prompt_text(prompter, "Email", &self.email)?;
        self.first_name = prompt_text(prompter, "First name", &self.first_name)?;
        self.last_name = prompt_text(prompter, "Last name", &self.last_name)?;
        self.password = prompter.password("Password")?;
        self.membership_type = prompt_choice(
            prompter,
            "Membership type",
            &MembershipType::ALL,
            self.membership_type,
        )?;
        self.membership_start_date =
            prompt_date(prompter, "Start date (YYYY-MM-DD)", self.membership_start_date)?;
        self.membership_end_date =
            prompt_date(prompter, "End date (YYYY-MM-DD)", self.membership_end_date)?;
        self.emergency_contact =
            prompt_text(prompter, "Emergency contact", &self.emergency_contact)?;
        self.medical_conditions =
            prompt_text(prompter, "Medical conditions", &self.medical_conditions)?;
        self.is_active = prompter.confirm("Active", self.is_active)?;
        Ok(())
    }

    fn into_payload(self) -> Result<MemberCreateRequest> {
        Ok(MemberCreateRequest {
            username: self.username,
            email: self.email,
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
            password: self.password,
            membership_type: self.membership_type,
            membership_start_date: self.membership_start_date,
            membership_end_date: self.membership_end_date,
            emergency_contact: non_empty(&self.emergency_contact),
            medical_conditions: non_empty(&self.medical_conditions),
            is_active: self.is_active,
        })
    }
}

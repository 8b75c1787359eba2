use anyhow::Result;
use validator::Validate;

use super::{finite_amount, non_empty, prompt_parsed, prompt_text, Form, Prompter};
use crate::models::TrainerCreateRequest;

/// New trainer: user account plus trainer profile
#[derive(Debug, Clone, Validate)]
pub struct TrainerForm {
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

    #[validate(length(min = 1, message = "Specialization is required"))]
    pub specialization: String,

    pub experience_years: u32,

    #[validate(
        range(min = 0.0, message = "Hourly rate cannot be negative"),
        custom(function = "finite_amount")
    )]
    pub hourly_rate: f64,

    pub bio: String,
    pub is_available: bool,
}

impl Default for TrainerForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password: String::new(),
            specialization: String::new(),
            experience_years: 0,
            hourly_rate: 50.0,
            bio: String::new(),
            is_available: true,
        }
    }
}

impl Form for TrainerForm {
    type Payload = TrainerCreateRequest;

    fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        self.username = prompt_text(prompter, "Username", &self.username)?;
        self.email = prompt_text(prompter, "Email", &self.email)?;
        self.first_name = prompt_text(prompter, "First name", &self.first_name)?;
        self.last_name = prompt_text(prompter, "Last name", &self.last_name)?;
        self.password = prompter.password("Password")?;
        self.specialization = prompt_text(prompter, "Specialization", &self.specialization)?;
        self.experience_years =
            prompt_parsed(prompter, "Experience (years)", &self.experience_years)?;
        self.hourly_rate = prompt_parsed(prompter, "Hourly rate", &self.hourly_rate)?;
        self.bio = prompt_text(prompter, "Bio", &self.bio)?;
        self.is_available = prompter.confirm("Available", self.is_available)?;
        Ok(())
    }

    fn into_payload(self) -> Result<TrainerCreateRequest> {
        Ok(TrainerCreateRequest {
            username: self.username,
            email: self.email,
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
            password: self.password,
            specialization: self.specialization,
            experience_years: self.experience_years,
            hourly_rate: self.hourly_rate.to_string(),
            bio: non_empty(&self.bio),
            is_available: self.is_available,
        })
    }
}

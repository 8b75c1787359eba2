use anyhow::Result;
use validator::Validate;

use super::{non_empty, prompt_text, Form, Prompter};
use crate::models::RegisterRequest;

/// Self-service account creation
#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password_confirm: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    pub phone_number: String,
}

impl Form for RegisterForm {
    type Payload = RegisterRequest;

    fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        self.username = prompt_text(prompter, "Username", &self.username)?;
        self.email = prompt_text(prompter, "Email", &self.email)?;
        self.password = prompter.password("Password")?;
        self.password_confirm = prompter.password("Confirm password")?;
        self.first_name = prompt_text(prompter, "First name", &self.first_name)?;
        self.last_name = prompt_text(prompter, "Last name", &self.last_name)?;
        self.phone_number = prompt_text(prompter, "Phone number", &self.phone_number)?;
        Ok(())
    }

    fn into_payload(self) -> Result<RegisterRequest> {
        Ok(RegisterRequest {
            username: self.username,
            email: self.email,
            password: self.password,
            password_confirm: self.password_confirm,
            first_name: self.first_name,
            last_name: self.last_name,
            role: None,
            phone_number: non_empty(&self.phone_number),
        })
    }
}

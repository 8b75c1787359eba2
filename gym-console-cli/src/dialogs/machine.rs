use anyhow::Result;
use validator::Validate;

use super::{prompt_text, Form, Prompter};
use crate::models::{Machine, MachineRequest};

#[derive(Debug, Clone, Default, Validate)]
pub struct MachineForm {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub description: String,
}

impl MachineForm {
    pub fn from_machine(machine: &Machine) -> Self {
        Self {
            code: machine.code.clone(),
            name: machine.name.clone(),
            description: machine.description.clone(),
        }
    }
}

impl Form for MachineForm {
    type Payload = MachineRequest;

    fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        self.code = prompt_text(prompter, "Code", &self.code)?;
        self.name = prompt_text(prompter, "Name", &self.name)?;
        self.description = prompt_text(prompter, "Description", &self.description)?;
        Ok(())
    }

    fn into_payload(self) -> Result<MachineRequest> {
        Ok(MachineRequest {
            code: self.code,
            name: self.name,
            description: self.description,
        })
    }
}

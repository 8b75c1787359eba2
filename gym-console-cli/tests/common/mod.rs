#![allow(dead_code)]

use anyhow::Result;
use serde_json::{json, Value};
use std::collections::VecDeque;

use gym_console_cli::config::Config;
use gym_console_cli::context::AppContext;
use gym_console_cli::dialogs::Prompter;
use gym_console_cli::models::{Role, User};
use gym_console_cli::storage::Storage;

pub const ACCESS_TOKEN: &str = "access-abc";

/// One scripted reply, consumed in order
#[derive(Debug, Clone)]
pub enum Answer {
    Text(&'static str),
    Confirm(bool),
    Select(usize),
    Multi(Vec<usize>),
}

/// Prompter that replays canned answers and records every prompt it saw
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            asked: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt '{}'", prompt))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(prompt) {
            Answer::Text("") => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(text) => Ok(text.to_string()),
            other => panic!("expected text for '{}', got {:?}", prompt, other),
        }
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        match self.next(prompt) {
            Answer::Text(text) => Ok(text.to_string()),
            other => panic!("expected password for '{}', got {:?}", prompt, other),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt) {
            Answer::Confirm(yes) => Ok(yes),
            other => panic!("expected confirm for '{}', got {:?}", prompt, other),
        }
    }

    fn select(&mut self, prompt: &str, items: &[String], _default: usize) -> Result<usize> {
        match self.next(prompt) {
            Answer::Select(index) => {
                assert!(index < items.len(), "select index out of range for '{}'", prompt);
                Ok(index)
            }
            other => panic!("expected select for '{}', got {:?}", prompt, other),
        }
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        _items: &[String],
        _defaults: &[bool],
    ) -> Result<Vec<usize>> {
        match self.next(prompt) {
            Answer::Multi(indices) => Ok(indices),
            other => panic!("expected multi-select for '{}', got {:?}", prompt, other),
        }
    }
}

pub fn config_for(server_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = server_url.to_string();
    config.api.timeout_seconds = 5;
    config
}

pub fn user(role: Role) -> User {
    serde_json::from_value(user_json(role.as_str())).unwrap()
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": 1,
        "username": "alex",
        "email": "alex@example.com",
        "first_name": "Alex",
        "last_name": "Reyes",
        "role": role,
        "date_joined": "2025-01-10T09:00:00Z"
    })
}

/// Context with nobody logged in
pub fn anonymous_context(server_url: &str) -> AppContext {
    AppContext::new(config_for(server_url), None, Storage::temporary().unwrap()).unwrap()
}

/// Context whose storage already holds a session for a user with `role`
pub fn context_as(server_url: &str, role: Role) -> AppContext {
    context_with(config_for(server_url), role)
}

/// Like [`context_as`], with a caller-supplied config
pub fn context_with(config: Config, role: Role) -> AppContext {
    let storage = Storage::temporary().unwrap();
    storage
        .save_session(ACCESS_TOKEN, "refresh-abc", &user(role))
        .unwrap();
    AppContext::new(config, None, storage).unwrap()
}

pub fn member_json(id: i64) -> Value {
    json!({
        "id": id,
        "user": id + 100,
        "username": format!("member{}", id),
        "email": format!("member{}@example.com", id),
        "first_name": "Member",
        "last_name": id.to_string(),
        "membership_type": "basic",
        "membership_start_date": "2025-01-01",
        "membership_end_date": "2026-01-01",
        "is_active": true,
        "created_at": "2025-01-01T10:00:00Z"
    })
}

pub fn trainer_json(id: i64) -> Value {
    json!({
        "id": id,
        "user": id + 200,
        "username": format!("coach{}", id),
        "first_name": "Coach",
        "last_name": id.to_string(),
        "specialization": "Strength",
        "experience_years": 4,
        "hourly_rate": "60.00",
        "is_available": true
    })
}

pub fn machine_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "code": format!("M-{:03}", id),
        "name": name,
        "description": "Concept2",
        "created_at": "2025-02-01T08:00:00Z"
    })
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Account roles as reported by the API
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Trainer,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Trainer => "trainer",
            Role::Member => "member",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "trainer" => Ok(Role::Trainer),
            "member" | "trainee" => Ok(Role::Member),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

// The backend stores roles upper-case ("ADMIN"); accept either spelling.
// A role this console does not know gets member rights.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown role '{}', treating as member", raw);
            Role::Member
        }))
    }
}

/// Authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Login request payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account creation payload
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Token pair plus identity, returned by login and by token-issuing register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// The two shapes `users/register/` has been deployed with
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RegisterResponse {
    Authenticated(AuthResponse),
    Created {
        #[serde(default)]
        user: Option<serde_json::Value>,
        #[serde(default)]
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_any_case() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"root","email":"r@x.io","first_name":"","last_name":"","role":"ADMIN"}"#,
        )
        .unwrap();
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "root");

        assert_eq!("Trainer".parse::<Role>().unwrap(), Role::Trainer);
        assert!("coach".parse::<Role>().is_err());
    }

    #[test]
    fn test_unknown_roles_are_not_admin() {
        let trainee: User =
            serde_json::from_str(r#"{"id":3,"username":"tia","role":"TRAINEE"}"#).unwrap();
        assert_eq!(trainee.role, Role::Member);
        assert!(!trainee.is_admin());

        let other: User =
            serde_json::from_str(r#"{"id":4,"username":"val","role":"RECEPTION"}"#).unwrap();
        assert_eq!(other.role, Role::Member);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"member\"");
    }

    #[test]
    fn test_register_response_shapes() {
        let with_tokens: RegisterResponse = serde_json::from_str(
            r#"{"access":"a","refresh":"r","user":{"id":2,"username":"bo","role":"member"}}"#,
        )
        .unwrap();
        assert!(matches!(with_tokens, RegisterResponse::Authenticated(_)));

        let message_only: RegisterResponse = serde_json::from_str(
            r#"{"user":{"id":2,"username":"bo"},"message":"User registered successfully"}"#,
        )
        .unwrap();
        match message_only {
            RegisterResponse::Created { message, .. } => {
                assert_eq!(message.as_deref(), Some("User registered successfully"))
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }
}

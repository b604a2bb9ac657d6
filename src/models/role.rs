use serde::Serialize;
use std::fmt;

/// The three identities known to the system.
/// The login name *is* the role key: there is no separate identity → role mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UserRole {
    FieldWorker, // funcionario
    Inspector,   // fiscal
    Contractor,  // empresa
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::FieldWorker => "funcionario",
            UserRole::Inspector => "fiscal",
            UserRole::Contractor => "empresa",
        }
    }

    /// Convert login name → role
    pub fn from_username(s: &str) -> Option<Self> {
        match s {
            "funcionario" => Some(UserRole::FieldWorker),
            "fiscal" => Some(UserRole::Inspector),
            "empresa" => Some(UserRole::Contractor),
            _ => None,
        }
    }

    /// Human label used in CLI output
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::FieldWorker => "Field worker",
            UserRole::Inspector => "Inspector",
            UserRole::Contractor => "Contractor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

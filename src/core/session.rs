//! Session shell: who is logged in, and which screen they get.

use crate::core::access::AccessLayer;
use crate::errors::{AppError, AppResult};
use crate::models::UserRole;
use crate::store::RecordStore;

/// The screen each role lands on after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScreen {
    FieldWorker,
    Inspector,
    Contractor,
}

impl RoleScreen {
    pub fn title(&self) -> &'static str {
        match self {
            RoleScreen::FieldWorker => "New service request",
            RoleScreen::Inspector => "Inspector triage",
            RoleScreen::Contractor => "Contractor work orders",
        }
    }

    /// CLI entry point for the screen
    pub fn command(&self) -> &'static str {
        match self {
            RoleScreen::FieldWorker => "submit",
            RoleScreen::Inspector => "inspect",
            RoleScreen::Contractor => "contract",
        }
    }
}

/// Authenticated identity, alive for the duration of the process only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: UserRole,
}

impl Session {
    pub async fn login<S: RecordStore>(
        access: &AccessLayer<S>,
        username: &str,
        password: &str,
    ) -> AppResult<Self> {
        let role = access.authenticate(username, password).await?;
        tracing::debug!(username, role = %role, "logged in");

        Ok(Self {
            username: username.to_string(),
            role,
        })
    }

    pub fn screen(&self) -> RoleScreen {
        match self.role {
            UserRole::FieldWorker => RoleScreen::FieldWorker,
            UserRole::Inspector => RoleScreen::Inspector,
            UserRole::Contractor => RoleScreen::Contractor,
        }
    }

    /// Refuse the action unless the session belongs to `role`.
    pub fn require(&self, role: UserRole) -> AppResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "'{}' is signed in as {}, this action needs {}",
                self.username,
                self.role.label(),
                role.label()
            )))
        }
    }
}

use crate::errors::{AppError, AppResult};
use crate::models::UserRole;

/// Static login table: (username, password). Compared in plain text.
pub const CREDENTIALS: &[(&str, &str)] = &[
    ("funcionario", "func123"),
    ("fiscal", "fiscal123"),
    ("empresa", "empresa123"),
];

/// Check a username/password pair and return the role it maps to.
pub fn check_credentials(username: &str, password: &str) -> AppResult<UserRole> {
    let known = CREDENTIALS
        .iter()
        .any(|(user, pass)| *user == username && *pass == password);

    if !known {
        return Err(AppError::InvalidCredentials);
    }

    // the username doubles as role key
    UserRole::from_username(username).ok_or(AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_maps_to_its_role() {
        for (user, pass) in CREDENTIALS {
            let role = check_credentials(user, pass).unwrap();
            assert_eq!(role.as_str(), *user);
        }
    }

    #[test]
    fn wrong_password_and_unknown_user_are_rejected() {
        assert!(matches!(
            check_credentials("fiscal", "wrongpass"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            check_credentials("admin", "fiscal123"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            check_credentials("FISCAL", "fiscal123"),
            Err(AppError::InvalidCredentials)
        ));
    }
}

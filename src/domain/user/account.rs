//! Stored account - one entry of the user directory.

use serde::{Deserialize, Serialize};

use super::password::PasswordDigest;
use super::registration::normalize_email;
use crate::domain::foundation::{AuthenticatedUser, UserId, UserRole};

/// A user directory entry. Only the password hash is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(rename = "userType")]
    pub role: UserRole,
    pub password_hash: PasswordDigest,
}

impl StoredAccount {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        password_hash: PasswordDigest,
    ) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            role,
            password_hash,
        }
    }

    /// Case-insensitive email comparison.
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }

    /// The password-free session record for this account.
    pub fn to_user(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id.clone(), &self.name, &self.email, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> StoredAccount {
        StoredAccount::new(
            "Jean Dupont",
            "Jean@X.fr",
            UserRole::Candidate,
            PasswordDigest::from_phc("$argon2id$stub"),
        )
    }

    #[test]
    fn email_match_ignores_case_and_padding() {
        assert!(account().has_email(" jean@x.FR"));
        assert!(!account().has_email("marie@x.fr"));
    }

    #[test]
    fn session_record_drops_the_hash() {
        let account = account();
        let user = account.to_user();
        assert_eq!(user.id, account.id);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn directory_entry_uses_wire_names() {
        let json = serde_json::to_value(account()).unwrap();
        assert_eq!(json["userType"], "candidate");
        assert_eq!(json["passwordHash"], "$argon2id$stub");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Officer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Officer => f.write_str("officer"),
        }
    }
}

/// A stored user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    /// bcrypt hash, salt and cost included
    pub password_hash: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User as exposed over the API, without credential fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: u64,
    pub username: String,
    pub email: Option<String>,
    pub role: Role,
    pub department: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            department: user.department.clone(),
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: u64,
    pub username: String,
    pub role: Role,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_drops_credentials() {
        let user = User {
            id: 1,
            username: "admin".to_string(),
            password_hash: "$2b$04$abc".to_string(),
            email: Some("admin@police.gov".to_string()),
            role: Role::Admin,
            department: Some("Headquarters".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert_eq!(json["username"], "admin");
        assert_eq!(json["role"], "admin");
        assert!(json.get("password_hash").is_none());
    }
}

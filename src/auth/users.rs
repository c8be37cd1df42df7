//! User directory backed by `users.json`

use super::password::{hash_password, verify_password};
use super::types::{PublicUser, Role, User};
use crate::error::AppError;
use crate::records::StoreError;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const USERS_FILE: &str = "users.json";

struct DemoUser {
    id: u64,
    username: &'static str,
    password: &'static str,
    role: Role,
    department: &'static str,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        id: 1,
        username: "admin",
        password: "admin123",
        role: Role::Admin,
        department: "Headquarters",
    },
    DemoUser {
        id: 2,
        username: "officer1",
        password: "officer123",
        role: Role::Officer,
        department: "District 1",
    },
    DemoUser {
        id: 3,
        username: "officer2",
        password: "officer123",
        role: Role::Officer,
        department: "District 2",
    },
];

#[derive(Debug, Clone)]
pub struct UserDirectory {
    path: PathBuf,
    hash_cost: u32,
}

impl UserDirectory {
    /// Directory in `data_dir`; new password hashes use `hash_cost`
    pub fn new(data_dir: &Path, hash_cost: u32) -> Self {
        Self {
            path: data_dir.join(USERS_FILE),
            hash_cost,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All users; a missing file means no users yet
    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&data).map_err(|e| StoreError::json(&self.path, e))
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.into_iter().find(|u| u.id == id))
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.into_iter().find(|u| u.username == username))
    }

    /// Check a username/password pair
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self.find_by_username(username)?;
        match user {
            Some(user) if verify_password(password, &user.password_hash) => {
                debug!("Authenticated {}", username);
                Ok(user)
            }
            _ => {
                warn!("Failed login for {:?}", username);
                Err(AppError::Unauthorized("Invalid credentials".to_string()))
            }
        }
    }

    /// Write the demo accounts, replacing any existing users file
    pub fn seed_demo_users(&self) -> Result<Vec<PublicUser>, AppError> {
        let users = DEMO_USERS
            .iter()
            .map(|demo| {
                Ok(User {
                    id: demo.id,
                    username: demo.username.to_string(),
                    password_hash: hash_password(demo.password, self.hash_cost)?,
                    email: Some(format!("{}@police.gov", demo.username)),
                    role: demo.role,
                    department: Some(demo.department.to_string()),
                    created_at: Utc::now(),
                })
            })
            .collect::<Result<Vec<User>, AppError>>()?;

        self.save(&users)?;
        info!("Seeded {} demo users into {}", users.len(), self.path.display());
        Ok(users.iter().map(PublicUser::from).collect())
    }

    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let data =
            serde_json::to_string_pretty(users).map_err(|e| StoreError::json(&self.path, e))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(|e| StoreError::io(&self.path, e))?;
        }
        Ok(())
    }
}

//! User account records.

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::utils::{null_as_default, string_or_number};

/// A user as returned by the auth and admin endpoints.
///
/// `role` is normalized on deserialization, so a `User` always carries a
/// lower-case role regardless of what the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// `GET /admin/users` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<User>,
}

/// `PATCH /admin/users/:id/role` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

//! Admin endpoints (`/admin/*`): job moderation and user management.

use jobboard_models::{JobsResponse, MessageResponse, Role, UpdateRoleRequest, UsersResponse};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Client for moderation and user management.
#[derive(Clone)]
pub struct AdminClient {
    api: ApiClient,
}

impl AdminClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn approve_job(&self, job_id: u64) -> ClientResult<MessageResponse> {
        self.api
            .patch_empty("admin_approve_job", &format!("/admin/approve/{}", job_id))
            .await
    }

    pub async fn approved_jobs(&self) -> ClientResult<JobsResponse> {
        self.api.get("admin_approved_jobs", "/admin/approved-jobs").await
    }

    /// Jobs waiting for approval.
    pub async fn unapproved_jobs(&self) -> ClientResult<JobsResponse> {
        self.api
            .get("admin_unapproved_jobs", "/admin/unapproved-jobs")
            .await
    }

    pub async fn users(&self) -> ClientResult<UsersResponse> {
        self.api.get("admin_users", "/admin/users").await
    }

    pub async fn delete_user(&self, user_id: &str) -> ClientResult<MessageResponse> {
        self.api
            .delete("admin_delete_user", &format!("/admin/users/{}", user_id))
            .await
    }

    pub async fn update_user_role(&self, user_id: &str, role: Role) -> ClientResult<MessageResponse> {
        self.api
            .patch(
                "admin_update_user_role",
                &format!("/admin/users/{}/role", user_id),
                &UpdateRoleRequest { role },
            )
            .await
    }
}

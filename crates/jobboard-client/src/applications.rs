//! Application endpoints.

use jobboard_models::{
    ApplicationResponse, ApplicationStatus, ApplicationsResponse, MessageResponse,
    ResumeUpload, UpdateApplicationRequest, UpdateApplicationStatusRequest,
};
use reqwest::multipart::{Form, Part};

use crate::error::ClientResult;
use crate::transport::ApiClient;

/// Client for job applications.
#[derive(Clone)]
pub struct ApplicationsClient {
    api: ApiClient,
}

impl ApplicationsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit an application as multipart form data (`resume`, `coverLetter`).
    pub async fn apply(
        &self,
        job_id: u64,
        resume: ResumeUpload,
        cover_letter: &str,
    ) -> ClientResult<ApplicationResponse> {
        let part = Part::bytes(resume.bytes)
            .file_name(resume.file_name)
            .mime_str(&resume.content_type)?;

        let form = Form::new()
            .part("resume", part)
            .text("coverLetter", cover_letter.to_string());

        self.api
            .post_multipart("applications_apply", &format!("/jobs/{}/apply", job_id), form)
            .await
    }

    /// Applications submitted by the caller.
    pub async fn mine(&self) -> ClientResult<ApplicationsResponse> {
        self.api.get("applications_mine", "/applications/me").await
    }

    pub async fn get(&self, id: u64) -> ClientResult<ApplicationResponse> {
        self.api
            .get("applications_get", &format!("/applications/{}", id))
            .await
    }

    pub async fn update(
        &self,
        id: u64,
        request: &UpdateApplicationRequest,
    ) -> ClientResult<ApplicationResponse> {
        self.api
            .patch("applications_update", &format!("/applications/{}", id), request)
            .await
    }

    pub async fn delete(&self, id: u64) -> ClientResult<MessageResponse> {
        self.api
            .delete("applications_delete", &format!("/applications/{}", id))
            .await
    }

    /// Applications received for a job (employers).
    pub async fn for_job(&self, job_id: u64) -> ClientResult<ApplicationsResponse> {
        self.api
            .get("applications_for_job", &format!("/jobs/{}/applications", job_id))
            .await
    }

    pub async fn update_status(
        &self,
        id: u64,
        status: ApplicationStatus,
    ) -> ClientResult<ApplicationResponse> {
        self.api
            .patch(
                "applications_update_status",
                &format!("/applications/{}/status", id),
                &UpdateApplicationStatusRequest { status },
            )
            .await
    }

    pub async fn by_status(&self, status: ApplicationStatus) -> ClientResult<ApplicationsResponse> {
        self.api
            .get_with_query(
                "applications_by_status",
                "/applications",
                &[("status", status.as_str())],
            )
            .await
    }

    pub async fn withdraw(&self, id: u64) -> ClientResult<MessageResponse> {
        self.api
            .post_empty(
                "applications_withdraw",
                &format!("/applications/{}/withdraw", id),
            )
            .await
    }
}

//! Job endpoints (`/jobs/*`).

use jobboard_models::{
    validate_form, CreateJobRequest, JobFilters, JobResponse, JobsResponse, MessageResponse,
    UpdateJobRequest,
};

use crate::error::{ClientError, ClientResult};
use crate::transport::ApiClient;

/// Client for job postings.
#[derive(Clone)]
pub struct JobsClient {
    api: ApiClient,
}

impl JobsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateJobRequest) -> ClientResult<JobResponse> {
        validate_form(request)?;
        self.api.post("jobs_create", "/jobs", request).await
    }

    /// List jobs with optional filters.
    pub async fn list(&self, filters: &JobFilters) -> ClientResult<JobsResponse> {
        self.api.get_with_query("jobs_list", "/jobs", filters).await
    }

    pub async fn get(&self, id: u64) -> ClientResult<JobResponse> {
        self.api.get("jobs_get", &format!("/jobs/{}", id)).await
    }

    pub async fn update(&self, id: u64, request: &UpdateJobRequest) -> ClientResult<JobResponse> {
        if request.is_empty() {
            return Err(ClientError::Validation(jobboard_models::ModelError::validation(
                "Nothing to update",
            )));
        }
        self.api.patch("jobs_update", &format!("/jobs/{}", id), request).await
    }

    pub async fn delete(&self, id: u64) -> ClientResult<MessageResponse> {
        self.api.delete("jobs_delete", &format!("/jobs/{}", id)).await
    }

    /// Jobs posted by the caller.
    pub async fn mine(&self) -> ClientResult<JobsResponse> {
        self.api.get("jobs_mine", "/jobs/me").await
    }

    pub async fn by_company(&self, company: &str) -> ClientResult<JobsResponse> {
        self.list(&JobFilters::default().with_company(company)).await
    }

    pub async fn by_location(&self, location: &str) -> ClientResult<JobsResponse> {
        self.list(&JobFilters::default().with_location(location)).await
    }

    /// Full-text search; `query` overrides any `search` already in `filters`.
    pub async fn search(&self, query: &str, filters: &JobFilters) -> ClientResult<JobsResponse> {
        self.list(&filters.clone().with_search(query)).await
    }
}

//! Job postings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::{null_as_default, string_or_number};

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// Owner of the posting
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl Job {
    /// Short single-line summary used by list views.
    pub fn summary(&self) -> String {
        let approval = if self.is_approved { "" } else { " (pending approval)" };
        format!(
            "#{} {} at {} [{}]{}",
            self.id, self.title, self.company, self.location, approval
        )
    }
}

/// `POST /jobs` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

/// `PATCH /jobs/:id` body; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJobRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UpdateJobRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.company.is_none()
            && self.location.is_none()
    }
}

/// Query parameters for `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "is_blank")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true)
}

impl JobFilters {
    /// Default listing used by the public jobs page: approved jobs, 10 per page.
    pub fn public_page(page: u32) -> Self {
        Self {
            page: Some(page.max(1)),
            limit: Some(10),
            is_approved: Some(true),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

/// Paged job listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jobs: Vec<Job>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl JobsResponse {
    /// Number of pages for the given page size.
    pub fn total_pages(&self, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        self.total.div_ceil(limit as u64)
    }
}

/// Single job envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub job: Job,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate_form;

    #[test]
    fn test_filters_omit_blank_values() {
        let filters = JobFilters::public_page(1).with_search("  ").with_company("Acme");
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["limit"], 10);
        assert_eq!(json["is_approved"], true);
        assert_eq!(json["company"], "Acme");
        assert!(json.get("search").is_none());
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_jobs_response_defaults() {
        let resp: JobsResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(resp.jobs.is_empty());
        assert_eq!(resp.total, 0);
    }

    #[test]
    fn test_job_parses_backend_shape() {
        let json = r#"{
            "id": 3, "title": "Rust Dev", "description": "d", "company": "Acme",
            "location": "Remote", "user_id": 9, "created_at": "2024-05-01T10:00:00Z",
            "is_approved": false, "status": "open"
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.user_id, "9");
        assert!(job.created_at.is_some());
        assert!(job.summary().contains("pending approval"));
    }

    #[test]
    fn test_total_pages() {
        let resp = JobsResponse {
            total: 21,
            ..Default::default()
        };
        assert_eq!(resp.total_pages(10), 3);
        assert_eq!(resp.total_pages(0), 0);
    }

    #[test]
    fn test_create_job_requires_title() {
        let req = CreateJobRequest {
            description: "d".into(),
            company: "c".into(),
            location: "l".into(),
            ..Default::default()
        };
        assert_eq!(validate_form(&req).unwrap_err().message(), "Title is required");
    }

    #[test]
    fn test_update_job_skips_absent_fields() {
        let req = UpdateJobRequest {
            title: Some("New".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New"}));
        assert!(!req.is_empty());
    }
}

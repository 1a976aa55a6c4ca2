//! Job applications.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::utils::null_as_default;

/// Resume file extensions accepted by the apply form.
pub const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Application review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Accepted => "accepted",
        }
    }

    /// Whether the reviewer has reached a final decision.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Accepted)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "accepted" => Ok(ApplicationStatus::Accepted),
            other => Err(ModelError::validation(format!(
                "Unknown application status: {}",
                other
            ))),
        }
    }
}

/// A submitted application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    pub job_id: u64,
    pub user_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_letter: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `PATCH /applications/:id` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

/// `PATCH /applications/:id/status` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// Application listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub applications: Vec<Application>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
}

/// Single application envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub application: Application,
}

/// Resume file attached to an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    /// Build an upload, rejecting empty files and unsupported extensions.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> ModelResult<Self> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(ModelError::validation("Please upload your resume"));
        }

        let extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ModelError::UnsupportedFile(file_name.clone()))?;

        let content_type = match extension.as_str() {
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => return Err(ModelError::UnsupportedFile(file_name)),
        };

        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        })
    }
}

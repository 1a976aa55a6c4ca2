//! Terminal rendering helpers shared by the views.

use jobboard_client::ClientError;
use jobboard_models::{Application, Job, User};
use jobboard_session::SessionError;

/// User-facing text for a failed command: the view's own context (if any)
/// followed by what the backend said.
pub fn error_message(err: &anyhow::Error) -> String {
    let Some(client) = err.chain().find_map(|cause| cause.downcast_ref::<ClientError>()) else {
        return match err.downcast_ref::<SessionError>() {
            Some(session) => session.to_string(),
            None => format!("{:#}", err),
        };
    };

    let detail = client_message(client);
    let top_is_client = err
        .chain()
        .next()
        .and_then(|cause| cause.downcast_ref::<ClientError>())
        .is_some();

    if top_is_client {
        detail
    } else {
        format!("{}: {}", err, detail)
    }
}

fn client_message(err: &ClientError) -> String {
    match err {
        ClientError::Validation(e) => e.message(),
        ClientError::Timeout(_) => "Request timed out".to_string(),
        ClientError::Network(_) => "Could not reach the server".to_string(),
        other => other
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}

pub fn job_line(job: &Job) -> String {
    let mut line = format!("#{:<5} {}", job.id, job.summary());
    if !job.is_approved {
        line.push_str("  [pending approval]");
    }
    line
}

pub fn print_job(job: &Job) {
    println!("{}", job.title);
    println!("  Company:  {}", job.company);
    println!("  Location: {}", job.location);
    if let Some(created) = job.created_at {
        println!("  Posted:   {}", created.format("%Y-%m-%d"));
    }
    if !job.status.is_empty() {
        println!("  Status:   {}", job.status);
    }
    println!();
    println!("{}", job.description);
}

pub fn application_line(application: &Application) -> String {
    let mut line = format!(
        "#{:<5} job #{:<5} {:<12}",
        application.id, application.job_id, application.status
    );
    if let Some(created) = application.created_at {
        line.push_str(&format!(" applied {}", created.format("%Y-%m-%d")));
    }
    line
}

pub fn user_line(user: &User) -> String {
    format!("{:<8} {:<20} {:<30} {}", user.id, user.username, user.email, user.role)
}

/// "Page 2 of 5", or nothing when everything fits on one page.
pub fn page_footer(page: u32, total_pages: u64) -> Option<String> {
    (total_pages > 1).then(|| format!("Page {} of {}", page, total_pages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use jobboard_models::{ModelError, Role};

    #[test]
    fn test_error_message_uses_server_text() {
        let err = anyhow::Error::from(ClientError::from_http_status(
            404,
            r#"{"message":"Job not found"}"#,
        ));
        assert_eq!(error_message(&err), "Job not found");
    }

    #[test]
    fn test_error_message_keeps_view_context() {
        let result: Result<(), ClientError> =
            Err(ClientError::from_http_status(500, r#"{"message":"db down"}"#));
        let err = result.context("Failed to load jobs").unwrap_err();

        assert_eq!(error_message(&err), "Failed to load jobs: db down");
    }

    #[test]
    fn test_error_message_for_validation_and_session() {
        let err = anyhow::Error::from(ClientError::from(ModelError::validation(
            "Please upload your resume",
        )));
        assert_eq!(error_message(&err), "Please upload your resume");

        let err = anyhow::Error::from(SessionError::rejected("Invalid email or password"));
        assert_eq!(error_message(&err), "Invalid email or password");
    }

    #[test]
    fn test_user_line_shows_normalized_role() {
        let user = User::new("4", "sam", "sam@x.io", Role::parse("EMPLOYER"));
        assert!(user_line(&user).ends_with("employer"));
    }

    #[test]
    fn test_page_footer() {
        assert_eq!(page_footer(1, 1), None);
        assert_eq!(page_footer(2, 3).as_deref(), Some("Page 2 of 3"));
    }
}

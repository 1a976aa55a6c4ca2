//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "jobboard",
    about = "Browse, post and apply to jobs on JobBoard",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in
    Login {
        #[arg(long, short = 'e')]
        email: String,

        #[arg(long, short = 'p')]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long, short = 'u')]
        username: String,

        #[arg(long, short = 'e')]
        email: String,

        #[arg(long, short = 'p')]
        password: String,

        /// Must match --password
        #[arg(long)]
        confirm_password: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in account (profile view)
    Whoami {
        /// Print the session state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request a password reset email
    ForgotPassword {
        #[arg(long, short = 'e')]
        email: String,
    },

    /// Set a new password using the token from the reset email
    ResetPassword {
        #[arg(long, short = 't')]
        token: String,

        #[arg(long, short = 'p')]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Job listings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },

    /// Apply to a job with a resume (.pdf, .doc or .docx)
    Apply {
        job_id: u64,

        #[arg(long, short = 'r')]
        resume: PathBuf,

        #[arg(long, short = 'c', default_value = "")]
        cover_letter: String,
    },

    /// Your applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },

    /// Administration
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Show what a client path resolves to for the current session
    Open { path: String },
}

#[derive(Subcommand, Debug)]
pub enum JobsCommand {
    /// Browse approved jobs
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, short = 's')]
        search: Option<String>,

        #[arg(long, short = 'l')]
        location: Option<String>,

        #[arg(long, short = 'c')]
        company: Option<String>,
    },

    /// Show one job
    Show { id: u64 },

    /// Jobs you posted
    Mine,

    /// Post a new job
    Post {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        company: String,

        #[arg(long)]
        location: String,
    },

    /// Edit a job you posted
    Edit {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a job you posted
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum ApplicationsCommand {
    /// Applications you submitted
    List,

    /// Withdraw an application
    Withdraw { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Jobs waiting for approval
    Pending,

    /// Approved jobs
    Approved,

    /// Approve a job
    Approve { job_id: u64 },

    /// All registered users
    Users,

    /// Delete a user
    DeleteUser { user_id: String },

    /// Change a user's role (user, employer, admin)
    SetRole { user_id: String, role: String },

    /// Admin-only page
    Whoami,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::try_parse_from(["jobboard", "jobs", "list", "--page", "2", "-s", "rust"])
            .unwrap();
        match cli.command {
            Command::Jobs {
                command: JobsCommand::List { page, search, .. },
            } => {
                assert_eq!(page, 2);
                assert_eq!(search.as_deref(), Some("rust"));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["jobboard", "admin", "set-role", "7", "employer"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Admin {
                command: AdminCommand::SetRole { .. }
            }
        ));
    }
}

//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use studyshelf_core::ResourceType;

/// Browse and administer the student resource catalog.
///
/// StudyShelf organizes study materials (notes, question papers, books)
/// by semester, subject, and unit, and uploads files into object
/// storage.
#[derive(Parser, Debug)]
#[command(name = "studyshelf")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to config file (defaults to $STUDYSHELF_CONFIG or the XDG location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the catalog database (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Act as this user id (admin commands; overrides config `admin_user`)
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the portal CLI.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all semesters
    Semesters,

    /// List a semester's subjects
    Subjects {
        /// Semester id
        semester_id: i64,
    },

    /// Show a subject's full resource page
    Show {
        /// Subject id
        subject_id: i64,
    },

    /// Add a single link-backed resource (admin)
    Add {
        /// Subject id
        subject_id: i64,

        /// Display title
        #[arg(long)]
        title: String,

        /// Resource URL (e.g. a Google Drive share link)
        #[arg(long)]
        url: String,

        /// Resource type: notes, cie1, cie2, cie3, see, book
        #[arg(long = "type", value_parser = parse_resource_type)]
        resource_type: ResourceType,

        /// Unit number (notes only)
        #[arg(long)]
        unit: Option<i64>,

        /// Exam/publication year
        #[arg(long)]
        year: Option<i64>,
    },

    /// Upload files and add them as resources (admin)
    Upload {
        /// Subject id
        subject_id: i64,

        /// Resource type: notes, cie1, cie2, cie3, see, book
        #[arg(long = "type", value_parser = parse_resource_type)]
        resource_type: ResourceType,

        /// Unit number (notes only)
        #[arg(long)]
        unit: Option<i64>,

        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Delete a resource by id (admin)
    Delete {
        /// Resource id
        id: i64,
    },

    /// Classify a resource URL for preview
    Preview {
        /// The URL to classify
        url: String,

        /// Also fetch and print the body for text previews
        #[arg(long)]
        fetch: bool,
    },

    /// Grant the admin role to a user
    GrantAdmin {
        /// User id to grant
        user_id: String,
    },
}

fn parse_resource_type(s: &str) -> Result<ResourceType, String> {
    s.parse()
}

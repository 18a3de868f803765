//! CLI entry point for the StudyShelf portal tool.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::ProgressBar;
use studyshelf_core::{
    AddResource, AdminPanel, CatalogStore, Database, HttpObjectStore, PreviewKind, RoleStore,
    Session, SubjectLayout, TextFetcher, resolve_preview,
};
use studyshelf_core::catalog::build_subject_view;
use studyshelf_core::upload::{CandidateFile, expected_mime, extension_of};
use tracing::{debug, info};

mod cli;
mod config;

use cli::{Args, Command};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }

    // Preview classification needs no database
    if let Command::Preview { url, fetch } = &args.command {
        return run_preview(url, *fetch).await;
    }

    let db = Database::new(&config.db_path).await?;
    let catalog = CatalogStore::new(db.clone());
    let roles = RoleStore::new(db.clone());

    let session = args
        .user
        .clone()
        .or_else(|| config.admin_user.clone())
        .map(Session::new);

    match args.command {
        Command::Semesters => {
            let semesters = catalog.list_semesters().await?;
            if semesters.is_empty() {
                println!("No semesters in the catalog.");
            }
            for semester in semesters {
                println!("{:>4}  {}", semester.id, semester.name);
            }
        }

        Command::Subjects { semester_id } => {
            let subjects = catalog.subjects_by_semester(semester_id).await?;
            if subjects.is_empty() {
                println!("No subjects for semester {semester_id}.");
            }
            for subject in subjects {
                let lab = if subject.is_lab { " [lab]" } else { "" };
                println!("{:>4}  {}  {}{}", subject.id, subject.code, subject.name, lab);
            }
        }

        Command::Show { subject_id } => {
            run_show(&catalog, subject_id).await?;
        }

        Command::Add {
            subject_id,
            title,
            url,
            resource_type,
            unit,
            year,
        } => {
            // Link adds never touch storage; no endpoint required
            let store = HttpObjectStore::new(&config.storage.base_url, &config.storage.bucket);
            let panel = AdminPanel::new(&roles, &catalog, &store);
            let id = panel
                .add_resource(
                    session.as_ref(),
                    AddResource {
                        subject_id,
                        title,
                        file_url: url,
                        resource_type,
                        unit_number: unit,
                        year,
                    },
                )
                .await?;
            println!("Added resource {id}.");
        }

        Command::Upload {
            subject_id,
            resource_type,
            unit,
            files,
        } => {
            let store = storage_client(&config)?;
            let panel = AdminPanel::new(&roles, &catalog, &store);
            let candidates = read_candidates(&files).await?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Uploading {} file(s)...", candidates.len()));
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));
            let result = panel
                .upload_resources(session.as_ref(), subject_id, resource_type, unit, candidates)
                .await;
            spinner.finish_and_clear();
            let report = result?;

            for added in &report.added {
                println!("  added {:>4}  {}  {}", added.id, added.title, added.file_url);
            }
            for rejected in &report.rejected {
                println!("  rejected {}: {}", rejected.name, rejected.reason);
            }
            println!("{}", report.summary());
        }

        Command::Delete { id } => {
            let store = HttpObjectStore::new(&config.storage.base_url, &config.storage.bucket);
            let panel = AdminPanel::new(&roles, &catalog, &store);
            panel.delete_resource(session.as_ref(), id).await?;
            println!("Deleted resource {id}.");
        }

        Command::GrantAdmin { user_id } => {
            roles.grant_role(&user_id, studyshelf_core::ADMIN_ROLE).await?;
            println!("Granted admin to {user_id}.");
        }

        Command::Preview { .. } => unreachable!("handled before database setup"),
    }

    db.close().await;
    Ok(())
}

/// Builds the storage client from config; upload commands need one.
fn storage_client(config: &Config) -> Result<HttpObjectStore> {
    if config.storage.base_url.is_empty() {
        bail!(
            "No storage endpoint configured. Set `storage.base_url` in the config file."
        );
    }
    Ok(HttpObjectStore::new(
        &config.storage.base_url,
        &config.storage.bucket,
    ))
}

/// Reads files from disk into upload candidates, guessing the content
/// type from the extension.
async fn read_candidates(paths: &[PathBuf]) -> Result<Vec<CandidateFile>> {
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("'{}' has no file name", path.display()))?;
        let mime_type = extension_of(&name)
            .and_then(|ext| expected_mime(&ext))
            .map(ToString::to_string);
        candidates.push(CandidateFile {
            name,
            mime_type,
            bytes,
        });
    }
    Ok(candidates)
}

/// Renders a subject's full resource page to stdout.
async fn run_show(catalog: &CatalogStore, subject_id: i64) -> Result<()> {
    let Some(subject) = catalog.subject(subject_id).await? else {
        bail!("No subject with id {subject_id}");
    };
    let units = catalog.units_by_subject(subject_id).await?;
    let resources = catalog.resources_by_subject(subject_id).await?;
    info!(
        units = units.len(),
        resources = resources.len(),
        "building subject view"
    );

    let view = build_subject_view(&subject, &units, &resources);
    println!("{}  {}", subject.code, subject.name);

    match &view.layout {
        SubjectLayout::UnitWise { units, cie, see } => {
            for section in units {
                println!("\nUnit {}: {}", section.unit_number, section.title);
                print_resources(&section.notes);
            }
            for section in cie {
                println!("\n{}", section.label);
                print_resources(&section.papers);
            }
            println!("\n{}", see.label);
            print_resources(&see.papers);
        }
        SubjectLayout::Flat { notes } => {
            println!("\nNotes");
            print_resources(notes);
        }
    }

    println!("\n{}", view.books_label);
    print_resources(&view.books);
    Ok(())
}

fn print_resources(resources: &[studyshelf_core::Resource]) {
    if resources.is_empty() {
        println!("  (none)");
        return;
    }
    for resource in resources {
        let year = resource
            .year
            .map_or_else(String::new, |y| format!("  [{y}]"));
        println!("  {:>4}  {}{}  {}", resource.id, resource.title, year, resource.file_url);
    }
}

/// Classifies (and optionally fetches) a URL without touching the catalog.
async fn run_preview(url: &str, fetch: bool) -> Result<()> {
    let preview = resolve_preview(url);
    println!("kind:     {:?}", preview.kind);
    match &preview.embed_url {
        Some(embed) => println!("embed:    {embed}"),
        None => println!("embed:    (download only)"),
    }
    println!("download: {}", preview.download_url);

    if fetch && preview.kind == PreviewKind::Text {
        let fetcher = TextFetcher::new();
        let body = fetcher.fetch(url).await?;
        println!("\n{body}");
    }
    Ok(())
}

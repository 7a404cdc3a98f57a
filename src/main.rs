mod cli;
mod config;
mod content;
mod engine;
mod error;
mod export;
mod report;
mod scan;
mod store;
mod telemetry;
mod types;

use crate::content::ScoringContent;
use crate::engine::ScoringEngine;
use crate::error::RiasecError;
use crate::report::OutputFormat;
use crate::store::{StudentQuery, StudentStore};
use crate::types::category::Category;
use crate::types::config::RiasecConfig;
use crate::types::report::ReportDocument;
use crate::types::student::{Student, StudentStatus};
use chrono::Utc;
use clap::Parser;
use std::io::{self, Write};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, RiasecError> {
    let cli = cli::Cli::parse();
    if !cli.root.exists() {
        return Err(RiasecError::PathNotFound(cli.root.display().to_string()));
    }

    let loaded = config::load_config(&cli.root)?;
    let cfg = loaded.clone().unwrap_or_default();
    telemetry::init(&telemetry::level_for(
        cli.verbose,
        cli.quiet,
        cfg.log_level(),
    ))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "riasec starting");

    // Content problems abort here, before any command runs.
    let content = ScoringContent::load(&cli.root, loaded.as_ref())?;
    let engine = ScoringEngine::new(content, cfg.key_prefix());

    match cli.command {
        cli::Commands::Score(cmd) => {
            let format = resolve_format(cmd.format, &cfg);
            let files = scan::load_answer_files(&cmd.path, engine.key_prefix())?;
            if files.is_empty() {
                eprintln!("warning: no answer files found in {}", cmd.path.display());
                return Ok(exit_code::WARNINGS);
            }

            let today = Utc::now().date_naive();
            let mut incomplete = false;
            let mut documents = Vec::with_capacity(files.len());
            for file in files {
                tracing::debug!(
                    path = %file.path.display(),
                    answers = file.answers.len(),
                    "scoring answer file"
                );
                let document = engine.document(file.subject, &file.answers, today);
                if !document.coverage.is_complete() {
                    incomplete = true;
                    if !cli.quiet {
                        eprintln!(
                            "warning: {} answered {} of {} questions",
                            file.label, document.coverage.answered, document.coverage.total
                        );
                    }
                }
                documents.push(document);
            }

            print_documents(&documents, format)?;
            Ok(if incomplete {
                exit_code::WARNINGS
            } else {
                exit_code::SUCCESS
            })
        }
        cli::Commands::Students(cli::StudentsCommand::List(cmd)) => {
            let store = StudentStore::open(&cli.root.join(cfg.store_path()))?;
            let page = store.list(&StudentQuery {
                search: cmd.search.clone(),
                page: cmd.page,
                per_page: cmd.per_page.unwrap_or_else(|| cfg.page_size()),
            });

            if store.is_empty() {
                println!("no students in {}", store.path().display());
                return Ok(exit_code::SUCCESS);
            }
            if page.total == 0 {
                println!(
                    "no students matching \"{}\"",
                    cmd.search.as_deref().unwrap_or_default()
                );
                return Ok(exit_code::SUCCESS);
            }

            for student in &page.items {
                println!(
                    "{:<10} {:<24} {:<28} {:<10} {:<10} {}",
                    student.id,
                    student.name,
                    student.school_name,
                    student.grade,
                    student.status,
                    student
                        .last_assessment_date
                        .map(|date| date.to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            if page.items.is_empty() {
                println!("page {} is past the end", page.page);
            } else {
                println!(
                    "showing {} to {} of {} results (page {} of {})",
                    page.first_index + 1,
                    page.first_index + page.items.len(),
                    page.total,
                    page.page,
                    page.total_pages
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Students(cli::StudentsCommand::Add(cmd)) => {
            let mut store = StudentStore::open(&cli.root.join(cfg.store_path()))?;
            let id = cmd.id.clone().unwrap_or_else(|| store.next_id());
            let mut student = Student::new(id, cmd.name.clone());
            if let Some(school) = &cmd.school {
                student.school_name = school.clone();
            }
            if let Some(email) = &cmd.email {
                student.email = email.clone();
            }
            if let Some(grade) = &cmd.grade {
                student.grade = grade.clone();
            }
            if let Some(path) = &cmd.answers {
                let file = scan::read_answer_file(path, engine.key_prefix())?;
                student.answers = file.answers;
                student.status = StudentStatus::Completed;
                student.last_assessment_date = Some(Utc::now().date_naive());
            }

            let id = student.id.clone();
            store.insert(student)?;
            store.save()?;
            println!("added {id}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Students(cli::StudentsCommand::Delete(cmd)) => {
            let mut store = StudentStore::open(&cli.root.join(cfg.store_path()))?;
            let student = store.get(&cmd.id)?;
            if !cmd.yes && !confirm_delete(&student.name)? {
                println!("delete cancelled");
                return Ok(exit_code::SUCCESS);
            }
            let removed = store.remove(&cmd.id)?;
            store.save()?;
            println!("deleted {} ({})", removed.id, removed.name);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Report(cmd) => {
            let format = resolve_format(cmd.format, &cfg);
            let store = StudentStore::open(&cli.root.join(cfg.store_path()))?;
            let students: Vec<&Student> = match &cmd.student {
                Some(id) => {
                    let student = store.get(id)?;
                    if !student.is_completed() {
                        return Err(RiasecError::AssessmentIncomplete(id.clone()));
                    }
                    vec![student]
                }
                None => {
                    let completed: Vec<&Student> = store.completed().collect();
                    let skipped = store.len() - completed.len();
                    if skipped > 0 {
                        tracing::info!(skipped, "skipping students without a completed assessment");
                    }
                    completed
                }
            };

            if students.is_empty() {
                println!("report: no completed assessments");
                return Ok(exit_code::SUCCESS);
            }

            let today = Utc::now().date_naive();
            let documents: Vec<ReportDocument> = students
                .iter()
                .map(|student| {
                    engine.document(
                        Some(student.subject()),
                        &student.answer_set(engine.key_prefix()),
                        today,
                    )
                })
                .collect();

            if cmd.export {
                let dir = cmd
                    .out_dir
                    .clone()
                    .unwrap_or_else(|| cli.root.join(cfg.export_dir()));
                let stamp = Utc::now();
                for document in &documents {
                    let path = export::write_report(&dir, document, format, stamp)?;
                    println!("exported: {}", path.display());
                }
            } else {
                print_documents(&documents, format)?;
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(_) => {
            let content = engine.content();
            println!("content version: {}", content.version());
            println!("fingerprint: {}", content.fingerprint());
            println!("questions: {}", content.questions().len());
            for category in Category::ordered() {
                println!(
                    "- {} {:<13} {}",
                    category,
                    category.label(),
                    content.questions().question_count(category)
                );
            }
            if loaded.is_none() {
                println!(
                    "config: defaults (no {} in {})",
                    config::DEFAULT_CONFIG_FILE,
                    cli.root.display()
                );
            }

            let empty = content.empty_categories();
            if empty.is_empty() {
                println!("check: ok");
                Ok(exit_code::SUCCESS)
            } else {
                let codes = empty.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                eprintln!(
                    "warning: categories without questions: {}",
                    codes.join(", ")
                );
                Ok(exit_code::WARNINGS)
            }
        }
    }
}

fn resolve_format(requested: Option<cli::ReportFormat>, cfg: &RiasecConfig) -> OutputFormat {
    match requested {
        Some(cli::ReportFormat::Json) => OutputFormat::Json,
        Some(cli::ReportFormat::Md) => OutputFormat::Md,
        Some(cli::ReportFormat::Text) => OutputFormat::Text,
        None => cfg
            .report_format()
            .and_then(OutputFormat::parse)
            .unwrap_or(OutputFormat::Md),
    }
}

fn print_documents(documents: &[ReportDocument], format: OutputFormat) -> Result<(), RiasecError> {
    if let [document] = documents {
        println!("{}", report::render(document, format)?);
        return Ok(());
    }
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(documents)?);
        return Ok(());
    }
    for document in documents {
        println!("{}", report::render(document, format)?);
    }
    Ok(())
}

fn confirm_delete(name: &str) -> Result<bool, RiasecError> {
    print!("delete {name}? [y/N]: ");
    io::stdout().flush().map_err(RiasecError::Io)?;
    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(RiasecError::Io)?;
    let normalized = input.trim().to_ascii_lowercase();
    Ok(normalized == "y" || normalized == "yes")
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}

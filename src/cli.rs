use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "riasec",
    version,
    about = "RIASEC career assessment scoring and student report CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding riasec.toml and the student store
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score answer documents without touching the student store
    Score(ScoreCommand),
    /// Manage student records
    #[command(subcommand)]
    Students(StudentsCommand),
    /// Render reports for completed students
    Report(ReportCommand),
    /// Validate configuration and scoring content
    Check(CheckCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Text,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Answer JSON file, or a directory scanned for *.json files
    pub path: PathBuf,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Subcommand)]
pub enum StudentsCommand {
    List(ListCommand),
    Add(AddCommand),
    Delete(DeleteCommand),
}

#[derive(Args)]
pub struct ListCommand {
    /// Case-insensitive match on name, school or email
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long)]
    pub per_page: Option<usize>,
}

#[derive(Args)]
pub struct AddCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub school: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub grade: Option<String>,
    /// Answer JSON file; marks the assessment completed
    #[arg(long)]
    pub answers: Option<PathBuf>,
}

#[derive(Args)]
pub struct DeleteCommand {
    pub id: String,
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ReportCommand {
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub student: Option<String>,

    #[arg(long, required_unless_present = "student", conflicts_with = "student")]
    pub all: bool,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Write report files instead of printing them
    #[arg(long)]
    pub export: bool,

    #[arg(long, requires = "export")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckCommand {}

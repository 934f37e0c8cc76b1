use crate::commands::{run_check, run_grade, run_retag, run_show, GradeArgs, RetagArgs, ShowArgs};
use clap::{Args, Parser, Subcommand};
use kedge_quiz::config::AppConfig;
use kedge_quiz::error::AppError;
use kedge_quiz::quiz::ReviewPolicy;
use kedge_quiz::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Kedge Quiz",
    about = "Validate, inspect, and grade quiz definitions from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every quiz in a JSON file and report the broken ones
    Check(CheckArgs),
    /// Print the client view of one quiz, or of every quiz in the file
    Show(ShowArgs),
    /// Grade a submitted answer against a quiz
    Grade(GradeArgs),
    /// Move a quiz to another knowledge point and print the stored record
    Retag(RetagArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// JSON file holding one quiz record or an array of records
    #[arg(long, short)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let policy = ReviewPolicy::from(&config.review);
    debug!(environment = ?config.environment, ?policy, "quiz cli configured");

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::Show(args) => run_show(args, policy),
        Command::Grade(args) => run_grade(args, policy),
        Command::Retag(args) => run_retag(args, policy),
    }
}

use crate::cli::{CheckArgs, SourceArgs};
use crate::infra::{load_records, parse_user_answer, seed_service};
use chrono::SecondsFormat;
use clap::Args;
use kedge_quiz::error::AppError;
use kedge_quiz::quiz::{
    AnswerFeedback, KnowledgePointRef, Quiz, QuizError, QuizId, QuizRecord, ReviewPolicy,
};
use tracing::warn;

const LIST_LIMIT: usize = 1_000;

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Quiz id to show. Every quiz in the file is shown when omitted.
    #[arg(long)]
    pub(crate) id: Option<String>,
    /// Include the answer, alternatives, and explanation
    #[arg(long)]
    pub(crate) include_answer: bool,
}

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Quiz id to grade against
    #[arg(long)]
    pub(crate) id: String,
    /// Submitted answer: JSON (`"Paris"`, `["A","B"]`, `[0,2]`) or plain text
    #[arg(long)]
    pub(crate) answer: String,
    /// Attempt number, used to decide whether hints are offered
    #[arg(long, default_value_t = 1)]
    pub(crate) attempt: u32,
}

#[derive(Args, Debug)]
pub(crate) struct RetagArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Quiz id to move
    #[arg(long)]
    pub(crate) id: String,
    /// Target knowledge point id
    #[arg(long)]
    pub(crate) knowledge_point: String,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let records = load_records(&args.source.file)?;
    let total = records.len();
    let failures = check_records(records);

    for (label, err) in &failures {
        println!("- {label}: {err}");
    }
    println!(
        "{} of {total} quiz definitions valid",
        total - failures.len()
    );

    match failures.into_iter().next() {
        Some((_, err)) => Err(err.into()),
        None => Ok(()),
    }
}

/// Validate each record, labelling failures by id or by position in the file.
fn check_records(records: Vec<QuizRecord>) -> Vec<(String, QuizError)> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| {
            let label = record
                .id
                .clone()
                .unwrap_or_else(|| format!("#{}", position + 1));
            match Quiz::create(record) {
                Ok(_) => None,
                Err(err) => {
                    warn!(quiz = %label, error = %err, "invalid quiz definition");
                    Some((label, err))
                }
            }
        })
        .collect()
}

pub(crate) fn run_show(args: ShowArgs, policy: ReviewPolicy) -> Result<(), AppError> {
    let service = seed_service(load_records(&args.source.file)?, policy)?;

    let output = match args.id {
        Some(id) => serde_json::to_string_pretty(&service.view(&QuizId(id), args.include_answer)?)?,
        None => serde_json::to_string_pretty(&service.list(LIST_LIMIT, args.include_answer)?)?,
    };
    println!("{output}");
    Ok(())
}

pub(crate) fn run_grade(args: GradeArgs, policy: ReviewPolicy) -> Result<(), AppError> {
    let service = seed_service(load_records(&args.source.file)?, policy)?;
    let answer = parse_user_answer(&args.answer);
    let feedback = service.submit_answer(&QuizId(args.id), &answer, args.attempt)?;

    render_feedback(&feedback);
    Ok(())
}

fn render_feedback(feedback: &AnswerFeedback) {
    println!(
        "{} | attempt {} | {} | graded at {}",
        feedback.quiz_id,
        feedback.attempt,
        feedback.outcome.label(),
        feedback
            .submitted_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    if let Some(explanation) = &feedback.explanation {
        println!("Explanation: {explanation}");
    }
    if let Some(hints) = &feedback.hints {
        for (blank, hint) in hints.iter().enumerate() {
            if let Some(hint) = hint {
                println!("Hint for blank {}: {hint}", blank + 1);
            }
        }
    }
}

pub(crate) fn run_retag(args: RetagArgs, policy: ReviewPolicy) -> Result<(), AppError> {
    let service = seed_service(load_records(&args.source.file)?, policy)?;
    let id = QuizId(args.id);
    let knowledge_point = KnowledgePointRef::new(args.knowledge_point)?;

    if !service.change_knowledge_point(&id, knowledge_point)? {
        println!("{id} already belongs to that knowledge point");
    }
    let record = service.load(&id)?.to_persistence();
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

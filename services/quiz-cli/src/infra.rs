use kedge_quiz::error::AppError;
use kedge_quiz::quiz::{
    QuizId, QuizRecord, QuizRepository, QuizService, RepositoryError, ReviewPolicy, UserAnswer,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Ordered by id so listings are stable between runs.
#[derive(Default, Clone)]
pub(crate) struct InMemoryQuizRepository {
    records: Arc<Mutex<BTreeMap<QuizId, QuizRecord>>>,
}

fn record_id(record: &QuizRecord) -> Result<QuizId, RepositoryError> {
    record
        .id
        .clone()
        .map(QuizId)
        .ok_or_else(|| RepositoryError::Unavailable("quiz record has no id".to_string()))
}

impl QuizRepository for InMemoryQuizRepository {
    fn insert(&self, record: QuizRecord) -> Result<QuizRecord, RepositoryError> {
        let id = record_id(&record)?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, record: QuizRecord) -> Result<(), RepositoryError> {
        let id = record_id(&record)?;
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            guard.insert(id, record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &QuizId) -> Result<Option<QuizRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<QuizRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().take(limit).cloned().collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuizFile {
    Many(Vec<QuizRecord>),
    One(Box<QuizRecord>),
}

/// Read quiz records from a JSON file holding either one record or an array of them.
pub(crate) fn load_records(path: &Path) -> Result<Vec<QuizRecord>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let records = match serde_json::from_str::<QuizFile>(&raw)? {
        QuizFile::Many(records) => records,
        QuizFile::One(record) => vec![*record],
    };
    debug!(path = %path.display(), count = records.len(), "quiz records loaded");
    Ok(records)
}

/// Store every record through the service, so each one is validated on the way in.
pub(crate) fn seed_service(
    records: Vec<QuizRecord>,
    policy: ReviewPolicy,
) -> Result<QuizService<InMemoryQuizRepository>, AppError> {
    let service = QuizService::new(Arc::new(InMemoryQuizRepository::default()), policy);
    for record in records {
        service.create(record)?;
    }
    Ok(service)
}

/// Submissions are JSON when they parse as an answer shape, otherwise plain text.
pub(crate) fn parse_user_answer(raw: &str) -> UserAnswer {
    serde_json::from_str(raw).unwrap_or_else(|_| UserAnswer::Text(raw.to_string()))
}

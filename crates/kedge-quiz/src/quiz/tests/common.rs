use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::quiz::record::{AnswerInput, QuizRecord};
use crate::quiz::repository::{QuizId, QuizRepository, RepositoryError};
use crate::quiz::review::ReviewPolicy;
use crate::quiz::service::QuizService;
use crate::quiz::{Quiz, ORDER_INDEPENDENT_GROUPS_KEY};

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn record(quiz_type: &str, question: &str) -> QuizRecord {
    QuizRecord {
        quiz_type: quiz_type.to_string(),
        question: question.to_string(),
        knowledge_point_id: "kp_1".to_string(),
        ..QuizRecord::default()
    }
}

pub(super) fn single_choice_record() -> QuizRecord {
    QuizRecord {
        options: Some(strings(&["林则徐", "魏源", "龚自珍", "洪秀全"])),
        answer: Some(AnswerInput::from("林则徐")),
        explanation: Some("林则徐主持了虎门销烟".to_string()),
        ..record("single-choice", "谁是中国近代禁烟运动的先驱?")
    }
}

pub(super) fn multiple_choice_record() -> QuizRecord {
    QuizRecord {
        options: Some(strings(&["林则徐", "康有为", "梁启超", "洪秀全"])),
        answer: Some(AnswerInput::from(vec!["康有为", "梁启超"])),
        ..record("multiple-choice", "选择中国近代的改革家(多选)")
    }
}

pub(super) fn capital_record() -> QuizRecord {
    QuizRecord {
        answer: Some(AnswerInput::from("Paris")),
        alternative_answers: strings(&["paris", "PARIS", "Paree"]),
        explanation: Some("Paris has been the capital since 987".to_string()),
        hints: Some(vec![Some("city".to_string())]),
        ..record("fill-in-the-blank", "The capital of France is ____")
    }
}

pub(super) fn reformers_record(order_independent: bool) -> QuizRecord {
    let extra_properties = order_independent.then(|| {
        let mut props = BTreeMap::new();
        props.insert(ORDER_INDEPENDENT_GROUPS_KEY.to_string(), json!([[0, 1]]));
        props
    });

    QuizRecord {
        answer: Some(AnswerInput::from(vec!["康有为", "梁启超"])),
        hints: Some(vec![Some("人名".to_string()), None]),
        extra_properties,
        ..record("fill-in-the-blank", "____和____是中国近代的改革家")
    }
}

pub(super) fn subjective_record() -> QuizRecord {
    QuizRecord {
        answer: Some(AnswerInput::from("鸦片战争打开了中国的大门")),
        ..record("subjective", "简述鸦片战争的影响")
    }
}

pub(super) fn quiz(record: QuizRecord) -> Quiz {
    Quiz::create(record).expect("fixture quiz is valid")
}

pub(super) fn build_service() -> (QuizService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = QuizService::new(repository.clone(), ReviewPolicy::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<QuizId, QuizRecord>>>,
}

fn record_id(record: &QuizRecord) -> Result<QuizId, RepositoryError> {
    record
        .id
        .clone()
        .map(QuizId)
        .ok_or_else(|| RepositoryError::Unavailable("record without id".to_string()))
}

impl QuizRepository for MemoryRepository {
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
        guard.insert(id, record);
        Ok(())
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

pub(super) struct UnavailableRepository;

impl QuizRepository for UnavailableRepository {
    fn insert(&self, _record: QuizRecord) -> Result<QuizRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: QuizRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &QuizId) -> Result<Option<QuizRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _limit: usize) -> Result<Vec<QuizRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

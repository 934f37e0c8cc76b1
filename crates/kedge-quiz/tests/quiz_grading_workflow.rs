//! Integration scenarios for quiz authoring, storage, and grading.
//!
//! Records enter as JSON the way an authoring tool or storage layer would hand them over, and
//! every assertion goes through the public crate surface.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use kedge_quiz::quiz::{
        QuizId, QuizRecord, QuizRepository, QuizService, RepositoryError, ReviewPolicy,
    };

    #[derive(Default, Clone)]
    pub(super) struct InMemoryQuizRepository {
        records: Arc<Mutex<HashMap<QuizId, QuizRecord>>>,
    }

    impl QuizRepository for InMemoryQuizRepository {
        fn insert(&self, record: QuizRecord) -> Result<QuizRecord, RepositoryError> {
            let id = QuizId(record.id.clone().expect("service assigns ids"));
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(id, record.clone());
            Ok(record)
        }

        fn update(&self, record: QuizRecord) -> Result<(), RepositoryError> {
            let id = QuizId(record.id.clone().expect("stored records have ids"));
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

    pub(super) fn service() -> QuizService<InMemoryQuizRepository> {
        QuizService::new(
            Arc::new(InMemoryQuizRepository::default()),
            ReviewPolicy::default(),
        )
    }

    pub(super) fn parse(value: Value) -> QuizRecord {
        serde_json::from_value(value).expect("quiz record json")
    }

    pub(super) fn opium_war_single_choice() -> QuizRecord {
        parse(json!({
            "type": "single-choice",
            "question": "谁是中国近代禁烟运动的先驱?",
            "options": ["林则徐", "魏源", "龚自珍", "洪秀全"],
            "answer": "林则徐",
            "knowledge_point_id": "kp_opium_war",
            "explanation": "1839年林则徐主持虎门销烟"
        }))
    }

    pub(super) fn reformers_multiple_choice() -> QuizRecord {
        parse(json!({
            "type": "multiple-choice",
            "question": "选择中国近代的改革家",
            "options": ["林则徐", "康有为", "梁启超", "洪秀全"],
            "answer": ["康有为", "梁启超"],
            "knowledge_point_id": "kp_reform"
        }))
    }

    pub(super) fn treaty_blanks() -> QuizRecord {
        parse(json!({
            "type": "fill-in-the-blank",
            "question": "《南京条约》开放了____、____和上海等通商口岸,签订于____年",
            "answer": ["广州", "厦门", "1842"],
            "knowledge_point_id": "kp_treaty",
            "hints": ["沿海城市", null, "年份"],
            "explanation": "五口通商:广州、厦门、福州、宁波、上海",
            "extra_properties": { "order-independent-groups": [[0, 1]] }
        }))
    }
}

use kedge_quiz::error::AppError;
use kedge_quiz::quiz::{GradeOutcome, Quiz, QuizId, QuizServiceError, UserAnswer};
use serde_json::json;

use common::*;

#[test]
fn single_choice_scenario_accepts_all_answer_shapes() {
    let quiz = Quiz::create(opium_war_single_choice()).expect("valid quiz");

    for answer in [json!("林则徐"), json!([0]), json!("0")] {
        let submission: UserAnswer = serde_json::from_value(answer.clone()).expect("answer json");
        assert!(quiz.validate_user_answer(&submission), "{answer} should be correct");
    }
    let wrong: UserAnswer = serde_json::from_value(json!([1])).expect("answer json");
    assert!(!quiz.validate_user_answer(&wrong));
}

#[test]
fn multiple_choice_scenario_is_order_independent() {
    let quiz = Quiz::create(reformers_multiple_choice()).expect("valid quiz");

    assert!(quiz.validate_user_answer(&UserAnswer::Indices(vec![2, 1])));
    assert!(!quiz.validate_user_answer(&UserAnswer::Indices(vec![1])));
}

#[test]
fn treaty_ports_may_be_named_in_either_order() {
    let quiz = Quiz::create(treaty_blanks()).expect("valid quiz");

    assert!(quiz.validate_user_answer(&UserAnswer::from(vec!["厦门", "广州", "1842"])));
    assert!(quiz.validate_user_answer(&UserAnswer::from(vec!["广州", "厦门", "1842"])));
    assert!(!quiz.validate_user_answer(&UserAnswer::from(vec!["1842", "厦门", "广州"])));
    assert!(!quiz.validate_user_answer(&UserAnswer::from(vec!["广州", "厦门"])));
}

#[test]
fn practice_session_reveals_help_progressively() {
    let service = service();
    let quiz = service.create(treaty_blanks()).expect("stored");
    let id = QuizId(quiz.id().expect("assigned id").to_string());

    let view = serde_json::to_value(service.view(&id, false).expect("view")).expect("json");
    assert!(view.get("answer").is_none());
    assert_eq!(view["hints"], json!(["沿海城市", null, "年份"]));

    let first = service
        .submit_answer(&id, &UserAnswer::from(vec!["福州", "厦门", "1842"]), 1)
        .expect("graded");
    assert_eq!(first.outcome, GradeOutcome::Incorrect);
    assert!(first.explanation.is_some());
    assert!(first.hints.is_none());

    let second = service
        .submit_answer(&id, &UserAnswer::from(vec!["福州", "厦门", "1842"]), 2)
        .expect("graded");
    assert!(second.hints.is_some());

    let third = service
        .submit_answer(&id, &UserAnswer::from(vec!["厦门", " 广州 ", "1842"]), 3)
        .expect("graded");
    assert_eq!(third.outcome, GradeOutcome::Correct);
    assert!(third.explanation.is_none());
}

#[test]
fn stored_quizzes_grade_like_freshly_created_ones() {
    let service = service();
    let original = service.create(reformers_multiple_choice()).expect("stored");
    let id = QuizId(original.id().expect("assigned id").to_string());
    let restored = service.load(&id).expect("loaded");

    assert_eq!(restored, original);
    for answer in [vec![1, 2], vec![2, 1], vec![1], vec![0, 1, 2]] {
        let submission = UserAnswer::Indices(answer);
        assert_eq!(
            original.validate_user_answer(&submission),
            restored.validate_user_answer(&submission)
        );
    }
}

#[test]
fn broken_definitions_map_to_bad_requests() {
    let service = service();
    let record = parse(json!({
        "type": "single-choice",
        "question": "Test",
        "options": ["A", "B", "C"],
        "answer_index": [5],
        "knowledge_point_id": "kp_1"
    }));

    let err = service.create(record).expect_err("index out of range");
    assert!(err.to_string().contains("out of options range"));

    let app_error = AppError::from(err);
    assert_eq!(app_error.status_code().as_u16(), 400);
}

#[test]
fn unknown_quizzes_map_to_not_found() {
    let service = service();
    let err = service
        .submit_answer(&QuizId("quiz-404".to_string()), &UserAnswer::from("x"), 1)
        .expect_err("missing quiz");
    assert!(matches!(err, QuizServiceError::Repository(_)));
    assert_eq!(AppError::from(err).status_code().as_u16(), 404);
}

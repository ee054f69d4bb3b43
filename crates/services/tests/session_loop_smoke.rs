use std::sync::Arc;

use quiz_core::model::{Catalog, CatalogItem, ItemId, QuizSettings};
use services::{
    Pacer, QuizLoopService, QuizServices, SessionError, SessionParams, SessionState,
    SubmitOutcome,
};
use storage::repository::{InMemoryStore, KeyValueStore};

fn kanji_catalog() -> Catalog {
    let pairs = [
        ("日", "sun, day"),
        ("月", "moon, month"),
        ("火", "fire"),
        ("水", "water"),
        ("木", "tree"),
        ("金", "gold, money"),
        ("土", "earth"),
    ];
    Catalog::new(
        pairs
            .iter()
            .zip(1_u64..)
            .map(|((kanji, meaning), id)| CatalogItem::new(ItemId::new(id), *kanji, *meaning))
            .collect(),
    )
    .unwrap()
}

fn loop_service(kv: Arc<InMemoryStore>) -> QuizLoopService {
    QuizLoopService::new(kv, QuizSettings::default())
        .unwrap()
        .with_pacer(Pacer::Immediate)
}

#[tokio::test]
async fn session_loop_runs_to_completion() {
    let kv = Arc::new(InMemoryStore::new());
    let svc = loop_service(kv.clone());
    let catalog = kanji_catalog();
    let params = SessionParams::new(catalog.len(), 5, Some(12))
        .unwrap()
        .with_kind("kanji")
        .unwrap();

    let mut session = svc.start_session(&catalog, &params).await.unwrap();
    assert_eq!(session.scope().len(), 5);
    assert_eq!(session.partition().sizes().unseen, 5);

    let mut correct_given = 0;
    let mut turn = 0;
    while !session.is_finished() {
        let question = session.question().unwrap();
        assert!(session.scope().get(question.item_id).is_some());
        assert_eq!(question.options.len(), 4);

        let index = if turn % 2 == 0 {
            correct_given += 1;
            question.correct_index
        } else {
            (question.correct_index + 1) % question.options.len()
        };
        turn += 1;

        let result = svc.answer_current(&mut session, index).await;
        assert!(matches!(result.outcome, SubmitOutcome::Recorded(_)));
        assert_ne!(result.state, SessionState::Revealed);
        assert!(session.partition().covers_exactly(session.scope().ids()));
    }

    assert_eq!(session.total_asked(), 12);
    assert_eq!(session.total_correct(), correct_given);
    assert!(kv.get("kanji-5").await.unwrap().is_some());

    let summary = session.exit().await;
    assert_eq!(summary.total_asked, 12);
    assert!(kv.get("kanji-5").await.unwrap().is_none());
}

#[tokio::test]
async fn sessions_with_different_scopes_do_not_share_records() {
    let kv = Arc::new(InMemoryStore::new());
    let svc = loop_service(kv.clone());
    let catalog = kanji_catalog();

    let four = SessionParams::new(catalog.len(), 4, None)
        .unwrap()
        .with_kind("kanji")
        .unwrap();
    let mut session = svc.start_session(&catalog, &four).await.unwrap();
    let wrong = (session.question().unwrap().correct_index + 1) % 4;
    svc.answer_current(&mut session, wrong).await;
    drop(session);

    assert!(kv.get("kanji-4").await.unwrap().is_some());
    assert!(kv.get("kanji-5").await.unwrap().is_none());

    let five = SessionParams::new(catalog.len(), 5, None)
        .unwrap()
        .with_kind("kanji")
        .unwrap();
    let fresh = svc.start_session(&catalog, &five).await.unwrap();
    assert_eq!(fresh.partition().sizes().unseen, 5);

    let resumed = svc.start_session(&catalog, &four).await.unwrap();
    assert_eq!(resumed.partition().sizes().wrong, 1);
}

#[tokio::test]
async fn unkeyed_session_writes_nothing() {
    let kv = Arc::new(InMemoryStore::new());
    let svc = loop_service(kv.clone());
    let catalog = kanji_catalog();
    let params = SessionParams::new(catalog.len(), 4, Some(4)).unwrap();

    let mut session = svc.start_session(&catalog, &params).await.unwrap();
    while !session.is_finished() {
        let correct = session.question().unwrap().correct_index;
        svc.answer_current(&mut session, correct).await;
    }
    assert_eq!(session.total_correct(), 4);
    assert!(session.key().is_none());
    assert!(kv.get("kanji-4").await.unwrap().is_none());
}

#[tokio::test]
async fn rejects_params_for_a_larger_catalog() {
    let svc = loop_service(Arc::new(InMemoryStore::new()));
    let catalog = kanji_catalog();
    let params = SessionParams::new(100, 10, None).unwrap();

    let err = svc.start_session(&catalog, &params).await.err().unwrap();
    assert!(matches!(
        err,
        SessionError::ScopeExceedsCatalog {
            requested: 10,
            available: 7
        }
    ));
}

#[tokio::test]
async fn in_memory_services_with_real_pacer() {
    let settings: QuizSettings = serde_json_settings(r#"{ "reveal_delay_ms": 5 }"#);
    let services = QuizServices::in_memory(settings, Pacer::Tokio).unwrap();
    let svc = services.quiz_loop();
    let catalog = kanji_catalog();
    let params = SessionParams::new(catalog.len(), 4, Some(4))
        .unwrap()
        .with_kind("vocab")
        .unwrap();

    let mut session = svc.start_session(&catalog, &params).await.unwrap();
    let correct = session.question().unwrap().correct_index;
    let result = svc.answer_current(&mut session, correct).await;
    assert_eq!(result.state, SessionState::Asking);
    assert_eq!(result.progress.total_asked, 1);
    assert!(services.storage().kv.get("vocab-4").await.unwrap().is_some());
}

fn serde_json_settings(raw: &str) -> QuizSettings {
    let settings: QuizSettings = serde_json::from_str(raw).unwrap();
    settings.validate().unwrap();
    settings
}

//! Integration tests for the chat orchestration pipeline.
//!
//! These tests exercise the full cycle over in-memory collaborators:
//! 1. Emotion detection feeds conversation tracking and generation
//! 2. Generation failures fall back to templates without surfacing errors
//! 3. The context window and emotional journey reach the generator
//! 4. Concurrent cycles never lose turns

use std::sync::Arc;

use empathy_ai::adapters::classifier::MockClassifier;
use empathy_ai::adapters::generation::MockGenerationProvider;
use empathy_ai::adapters::store::InMemoryConversationStore;
use empathy_ai::application::{ChatError, ChatInput, ChatService, EmotionDetector, ResponseGenerator};
use empathy_ai::domain::foundation::{ConversationId, UserId};
use empathy_ai::ports::{ClassifierError, GenerationError, LabelScore};

fn scores(pairs: &[(&str, f64)]) -> Vec<LabelScore> {
    pairs
        .iter()
        .map(|(label, score)| LabelScore {
            label: label.to_string(),
            score: *score,
        })
        .collect()
}

fn user() -> UserId {
    UserId::new("test-user").unwrap()
}

fn input(message: &str) -> ChatInput {
    ChatInput {
        user_message: message.to_string(),
        conversation_id: None,
    }
}

fn continue_input(message: &str, id: ConversationId) -> ChatInput {
    ChatInput {
        user_message: message.to_string(),
        conversation_id: Some(id),
    }
}

fn service_with(
    classifier: MockClassifier,
    provider: MockGenerationProvider,
    store: Arc<InMemoryConversationStore>,
) -> ChatService {
    ChatService::new(
        EmotionDetector::new(Arc::new(classifier)),
        ResponseGenerator::template_only()
            .with_provider(Arc::new(provider))
            .with_rng_seed(7),
        store,
    )
}

#[tokio::test]
async fn full_cycle_classifies_generates_and_persists() {
    let classifier =
        MockClassifier::new().with_distribution(scores(&[("sadness", 0.91), ("neutral", 0.09)]));
    let provider = MockGenerationProvider::new().with_response("I'm sorry you're going through this.");
    let store = Arc::new(InMemoryConversationStore::new());
    let service = service_with(classifier, provider, Arc::clone(&store));

    let outcome = service
        .chat(&user(), input("I lost my job today"))
        .await
        .unwrap();

    assert_eq!(outcome.response_text, "I'm sorry you're going through this.");
    assert_eq!(outcome.detected_emotion.label().to_string(), "sadness");
    assert_eq!(outcome.detected_emotion.confidence(), 0.91);

    let conversation = service
        .conversation(&user(), &outcome.conversation_id)
        .await
        .unwrap();
    assert_eq!(conversation.turns().len(), 2);
    assert_eq!(conversation.turns()[0].content, "I lost my job today");
    assert_eq!(
        conversation.turns()[1].content,
        "I'm sorry you're going through this."
    );
}

#[tokio::test]
async fn generation_failure_falls_back_to_template() {
    let classifier =
        MockClassifier::new().with_distribution(scores(&[("anger", 0.8), ("neutral", 0.2)]));
    let provider = MockGenerationProvider::new()
        .with_error(GenerationError::Unavailable("provider down".to_string()));
    let store = Arc::new(InMemoryConversationStore::new());
    let service = service_with(classifier, provider, Arc::clone(&store));

    let outcome = service.chat(&user(), input("This is infuriating")).await.unwrap();

    // The fallback answers from the template bank; the caller never sees
    // the provider failure.
    assert!(!outcome.response_text.is_empty());
    let conversation = service
        .conversation(&user(), &outcome.conversation_id)
        .await
        .unwrap();
    assert_eq!(conversation.turns().len(), 2);
    assert_eq!(conversation.turns()[1].content, outcome.response_text);
}

#[tokio::test]
async fn empty_message_short_circuits_to_neutral() {
    let classifier = MockClassifier::new();
    let provider = MockGenerationProvider::new().with_response("How are you feeling?");
    let store = Arc::new(InMemoryConversationStore::new());
    let classifier_handle = classifier.clone();
    let service = service_with(classifier, provider, Arc::clone(&store));

    let outcome = service.chat(&user(), input("   ")).await.unwrap();

    assert_eq!(outcome.detected_emotion.label().to_string(), "neutral");
    assert_eq!(outcome.detected_emotion.confidence(), 1.0);
    assert_eq!(classifier_handle.call_count(), 0);
}

#[tokio::test]
async fn classification_failure_commits_nothing() {
    let classifier = MockClassifier::new()
        .with_error(ClassifierError::Unavailable("classifier down".to_string()));
    let provider = MockGenerationProvider::new().with_response("unused");
    let store = Arc::new(InMemoryConversationStore::new());
    let service = service_with(classifier, provider, Arc::clone(&store));

    let result = service.chat(&user(), input("hello")).await;

    assert!(matches!(result, Err(ChatError::Classification(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn continued_conversation_feeds_context_to_generator() {
    let classifier = MockClassifier::new()
        .with_distribution(scores(&[("sadness", 0.9)]))
        .with_distribution(scores(&[("sadness", 0.85)]))
        .with_distribution(scores(&[("joy", 0.7), ("sadness", 0.3)]));
    let provider = MockGenerationProvider::new()
        .with_response("first reply")
        .with_response("second reply")
        .with_response("third reply");
    let provider_handle = provider.clone();
    let store = Arc::new(InMemoryConversationStore::new());
    let service = service_with(classifier, provider, Arc::clone(&store));

    let first = service.chat(&user(), input("everything went wrong")).await.unwrap();
    let id = first.conversation_id;
    service
        .chat(&user(), continue_input("still feeling low", id))
        .await
        .unwrap();
    service
        .chat(&user(), continue_input("but today was better!", id))
        .await
        .unwrap();

    let calls = provider_handle.get_calls();
    assert_eq!(calls.len(), 3);

    // The third prompt carries earlier turns and the running journey.
    let prompt = calls[2].system_prompt.clone().unwrap_or_default();
    assert!(prompt.contains("everything went wrong"));
    assert!(prompt.contains("first reply"));
    assert!(prompt.contains("The user is currently feeling joy"));
    assert!(prompt.contains("mostly been feeling sadness"));
}

#[tokio::test]
async fn shorter_context_window_trims_older_turns_from_the_prompt() {
    let classifier = MockClassifier::new()
        .with_distribution(scores(&[("sadness", 0.9)]))
        .with_distribution(scores(&[("sadness", 0.85)]))
        .with_distribution(scores(&[("neutral", 0.95)]));
    let provider = MockGenerationProvider::new()
        .with_response("first reply")
        .with_response("second reply")
        .with_response("third reply");
    let provider_handle = provider.clone();
    let store = Arc::new(InMemoryConversationStore::new());
    let service =
        service_with(classifier, provider, Arc::clone(&store)).with_context_turns(2);

    let first = service.chat(&user(), input("the opening gripe")).await.unwrap();
    let id = first.conversation_id;
    service
        .chat(&user(), continue_input("a follow-up", id))
        .await
        .unwrap();
    service
        .chat(&user(), continue_input("one more thing", id))
        .await
        .unwrap();

    // With a two-turn window the third prompt carries only the latest
    // assistant reply and the new message.
    let calls = provider_handle.get_calls();
    let prompt = calls[2].system_prompt.clone().unwrap_or_default();
    assert!(prompt.contains("second reply"));
    assert!(prompt.contains("one more thing"));
    assert!(!prompt.contains("the opening gripe"));
    assert!(!prompt.contains("first reply"));
}

#[tokio::test]
async fn unknown_conversation_is_not_found() {
    let classifier = MockClassifier::new().with_distribution(scores(&[("neutral", 1.0)]));
    let provider = MockGenerationProvider::new();
    let store = Arc::new(InMemoryConversationStore::new());
    let service = service_with(classifier, provider, store);

    let missing = ConversationId::new();
    let result = service.chat(&user(), continue_input("hi", missing)).await;
    assert!(matches!(result, Err(ChatError::NotFound(id)) if id == missing));
}

#[tokio::test]
async fn foreign_conversation_is_not_owned() {
    let classifier = MockClassifier::new()
        .with_distribution(scores(&[("neutral", 1.0)]))
        .with_distribution(scores(&[("neutral", 1.0)]));
    let provider = MockGenerationProvider::new().with_response("hello");
    let store = Arc::new(InMemoryConversationStore::new());
    let service = service_with(classifier, provider, store);

    let outcome = service.chat(&user(), input("mine")).await.unwrap();

    let intruder = UserId::new("other-user").unwrap();
    let result = service
        .chat(&intruder, continue_input("let me in", outcome.conversation_id))
        .await;
    assert!(matches!(result, Err(ChatError::NotOwned(_))));
}

#[tokio::test]
async fn concurrent_turns_on_one_conversation_lose_nothing() {
    let classifier = MockClassifier::new();
    let provider = MockGenerationProvider::new();
    let store = Arc::new(InMemoryConversationStore::new());
    let service = Arc::new(service_with(classifier, provider, Arc::clone(&store)));

    let first = service.chat(&user(), input("opening")).await.unwrap();
    let id = first.conversation_id;

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .chat(&user(), continue_input(&format!("message {}", i), id))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let conversation = service.conversation(&user(), &id).await.unwrap();
    // Opening pair plus eight concurrent pairs.
    assert_eq!(conversation.turns().len(), 18);
}

#[tokio::test]
async fn distinct_conversations_run_independently() {
    let classifier = MockClassifier::new();
    let provider = MockGenerationProvider::new();
    let store = Arc::new(InMemoryConversationStore::new());
    let service = Arc::new(service_with(classifier, provider, Arc::clone(&store)));

    let mut handles = Vec::new();
    for i in 0..4 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .chat(&user(), input(&format!("conversation {}", i)))
                .await
                .unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().conversation_id.to_string());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert_eq!(store.len(), 4);
}

#[tokio::test]
async fn history_lists_only_own_conversations() {
    let classifier = MockClassifier::new();
    let provider = MockGenerationProvider::new();
    let store = Arc::new(InMemoryConversationStore::new());
    let service = service_with(classifier, provider, store);

    service.chat(&user(), input("first topic")).await.unwrap();
    service.chat(&user(), input("second topic")).await.unwrap();
    let other = UserId::new("other-user").unwrap();
    service.chat(&other, input("their topic")).await.unwrap();

    let history = service.history(&user()).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|s| !s.title.contains("their")));
}

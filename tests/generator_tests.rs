use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use document_agent_server::document::generator::{
    CompletionAttempt, CompletionClient, FallbackGenerator, GenerationError, TextGenerator,
};

/// Replays a scripted sequence of attempt results and records the models
/// that were tried.
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<CompletionAttempt, GenerationError>>>,
    models_tried: Arc<Mutex<Vec<String>>>,
}

impl ScriptedClient {
    fn new(
        replies: Vec<Result<CompletionAttempt, GenerationError>>,
    ) -> (Self, Arc<Mutex<Vec<String>>>) {
        let models_tried = Arc::new(Mutex::new(Vec::new()));
        let client = Self {
            replies: Mutex::new(replies.into()),
            models_tried: models_tried.clone(),
        };
        (client, models_tried)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        model: &str,
        _prompt: &str,
    ) -> Result<CompletionAttempt, GenerationError> {
        self.models_tried.lock().unwrap().push(model.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }
}

fn candidates() -> Vec<String> {
    vec!["primary-model".to_string(), "fallback-model".to_string()]
}

#[tokio::test]
async fn test_second_candidate_succeeds_after_authorization_rejection() {
    let (client, models_tried) = ScriptedClient::new(vec![
        Ok(CompletionAttempt::Unauthorized),
        Ok(CompletionAttempt::Text("INVOICE #1234".to_string())),
    ]);
    let generator = FallbackGenerator::new(candidates(), client);

    let text = generator.generate("prompt").await.unwrap();
    assert_eq!(text, "INVOICE #1234");
    assert_eq!(
        *models_tried.lock().unwrap(),
        vec!["primary-model", "fallback-model"]
    );
}

#[tokio::test]
async fn test_all_candidates_unauthorized() {
    let (client, _) = ScriptedClient::new(vec![
        Ok(CompletionAttempt::Unauthorized),
        Ok(CompletionAttempt::Unauthorized),
    ]);
    let generator = FallbackGenerator::new(candidates(), client);

    let error = generator.generate("prompt").await.unwrap_err();
    assert!(matches!(error, GenerationError::AllCandidatesUnauthorized));
    // The failure message must not leak anything credential-shaped.
    let message = error.to_string();
    assert!(!message.contains("Bearer"));
    assert!(!message.contains("sk-"));
}

#[tokio::test]
async fn test_non_authorization_failure_stops_the_run() {
    let (client, models_tried) = ScriptedClient::new(vec![Err(GenerationError::Status(500))]);
    let generator = FallbackGenerator::new(candidates(), client);

    let error = generator.generate("prompt").await.unwrap_err();
    assert!(matches!(error, GenerationError::Status(500)));
    // The fallback candidate was never tried.
    assert_eq!(models_tried.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_output_stops_the_run() {
    let (client, models_tried) = ScriptedClient::new(vec![Err(GenerationError::NoUsableOutput)]);
    let generator = FallbackGenerator::new(candidates(), client);

    let error = generator.generate("prompt").await.unwrap_err();
    assert!(matches!(error, GenerationError::NoUsableOutput));
    assert_eq!(models_tried.lock().unwrap().len(), 1);
}

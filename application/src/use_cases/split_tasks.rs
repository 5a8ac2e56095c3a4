//! Split Tasks use case
//!
//! Decomposes a research plan into subtasks with one schema-constrained
//! request to the splitter model, then validates the answer.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use research_domain::{
    DecompositionError, Message, ModelSpec, PromptTemplate, ResearchPlan, Subtask,
    parse_subtask_list, subtask_list_schema,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SplitTasksError {
    #[error("Task splitting failed: {0}")]
    Generation(#[from] GatewayError),

    #[error("Invalid subtask list: {0}")]
    Decomposition(#[from] DecompositionError),
}

pub struct SplitTasksUseCase<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized> SplitTasksUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(
        &self,
        plan: &ResearchPlan,
        model: &ModelSpec,
    ) -> Result<Vec<Subtask>, SplitTasksError> {
        info!("Splitting the research plan into subtasks with {}", model);

        let request = CompletionRequest::new(
            model.clone(),
            vec![
                Message::system(PromptTemplate::splitter_system()),
                Message::user(plan.content()),
            ],
        )
        .with_response_schema(subtask_list_schema());

        let response = self.gateway.complete(request).await?;
        let text = response.text_content();
        debug!("Splitter response: {} bytes", text.len());

        let subtasks = parse_subtask_list(&text)?;

        self.logger.log(ConversationEvent::new(
            event_types::SUBTASKS_GENERATED,
            serde_json::json!({
                "model": model.routed_name(),
                "subtasks": subtasks,
            }),
        ));
        info!("Generated {} subtasks", subtasks.len());

        Ok(subtasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedGateway, ScriptedResponse};

    const SUBTASKS: &str = r#"{"subtasks": [
        {"id": "A", "title": "Construction", "description": "Building the canal"},
        {"id": "B", "title": "Suez Crisis", "description": "The 1956 crisis"}
    ]}"#;

    fn run(response: ScriptedResponse) -> (Arc<ScriptedGateway>, SplitTasksUseCase<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::new().script("splitter", vec![response]));
        let use_case = SplitTasksUseCase::new(gateway.clone());
        (gateway, use_case)
    }

    #[tokio::test]
    async fn test_schema_is_requested_and_output_validated() {
        let (gateway, use_case) = run(ScriptedResponse::text(SUBTASKS));
        let plan = ResearchPlan::new("1. Construction\n2. Crisis");

        let subtasks = use_case
            .execute(&plan, &ModelSpec::new("splitter", "auto"))
            .await
            .unwrap();

        assert_eq!(subtasks.len(), 2);
        assert_eq!(subtasks[0].id, "A");
        assert_eq!(subtasks[1].title, "Suez Crisis");

        let request = &gateway.requests()[0];
        let schema = request.response_schema.as_ref().unwrap();
        assert_eq!(schema.name, "subtaskList");
        assert!(schema.strict);
        assert_eq!(request.messages[1].content, plan.content());
    }

    #[tokio::test]
    async fn test_invalid_entry_fails_whole_batch() {
        let (_, use_case) = run(ScriptedResponse::text(
            r#"{"subtasks": [
                {"id": "A", "title": "Construction", "description": "Building"},
                {"id": "B", "title": "", "description": "Crisis"}
            ]}"#,
        ));

        let err = use_case
            .execute(&ResearchPlan::new("plan"), &ModelSpec::new("splitter", "auto"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SplitTasksError::Decomposition(DecompositionError::EmptyField {
                index: 1,
                field: "title"
            })
        ));
    }

    #[tokio::test]
    async fn test_non_json_answer() {
        let (_, use_case) = run(ScriptedResponse::text("A: construction, B: crisis"));

        let err = use_case
            .execute(&ResearchPlan::new("plan"), &ModelSpec::new("splitter", "auto"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SplitTasksError::Decomposition(DecompositionError::InvalidJson(_))
        ));
    }
}

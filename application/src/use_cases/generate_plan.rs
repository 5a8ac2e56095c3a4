//! Generate Plan use case
//!
//! Asks the planner model for a research plan in one single-turn request.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use research_domain::{Message, ModelSpec, PromptTemplate, Query, ResearchPlan};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GeneratePlanError {
    #[error("Plan generation failed: {0}")]
    Generation(#[from] GatewayError),

    #[error("Planner returned an empty plan")]
    EmptyPlan,
}

pub struct GeneratePlanUseCase<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + ?Sized> GeneratePlanUseCase<G> {
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
        query: &Query,
        model: &ModelSpec,
    ) -> Result<ResearchPlan, GeneratePlanError> {
        info!("Generating research plan with {}", model);

        let request = CompletionRequest::new(
            model.clone(),
            vec![
                Message::system(PromptTemplate::planner_system()),
                Message::user(query.content()),
            ],
        );
        let response = self.gateway.complete(request).await?;

        let plan = ResearchPlan::new(response.text_content().trim());
        if plan.is_blank() {
            return Err(GeneratePlanError::EmptyPlan);
        }

        self.logger.log(ConversationEvent::new(
            event_types::PLAN_GENERATED,
            serde_json::json!({
                "model": model.routed_name(),
                "query": query.content(),
                "plan": plan.content(),
            }),
        ));

        Ok(plan)
    }
}

//! End-to-end research run against scripted backends.

use async_trait::async_trait;
use research_application::{
    CompletionRequest, GatewayError, LlmGateway, ReportStore, ReportStoreError, ResearchConfig,
    RoleModels, RunResearchUseCase, SavedReport, ToolExecutorPort,
};
use research_domain::tool::entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
use research_domain::tool::value_objects::ToolResult;
use research_domain::{LlmResponse, ModelSpec, Query, ResearchOutcome, Role};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const PLAN: &str = "1. Construction of the canal\n2. The 1956 Suez Crisis\n3. The canal today";

const SUBTASKS: &str = r#"```json
{
  "subtasks": [
    {"id": "C", "title": "Modern Operations", "description": "Traffic and revenue today"},
    {"id": "A", "title": "Construction", "description": "Building the canal 1859-1869"},
    {"id": "B", "title": "Suez Crisis", "description": "The 1956 nationalisation and war"}
  ]
}
```"#;

/// Routes each request by role model, and worker requests by assigned subtask.
#[derive(Default)]
struct SuezGateway {
    synthesis_prompts: Mutex<Vec<String>>,
}

fn user_prompt(request: &CompletionRequest) -> String {
    request
        .messages
        .iter()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

#[async_trait]
impl LlmGateway for SuezGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<LlmResponse, GatewayError> {
        let prompt = user_prompt(&request);
        match request.model.model_id.as_str() {
            "planner-model" => Ok(LlmResponse::from_text(PLAN)),
            "splitter-model" => {
                assert!(request.response_schema.is_some());
                Ok(LlmResponse::from_text(SUBTASKS))
            }
            "worker-model" => {
                if prompt.contains("- ID: B") {
                    Err(GatewayError::InvalidRequest(
                        "input exceeds context window".into(),
                    ))
                } else if prompt.contains("- ID: A") {
                    Ok(LlmResponse::from_text("Ferdinand de Lesseps led the construction."))
                } else {
                    Ok(LlmResponse::from_text("About 12% of world trade passes the canal."))
                }
            }
            "editor-model" => {
                self.synthesis_prompts.lock().unwrap().push(prompt);
                Ok(LlmResponse::from_text("# The Suez Canal\n\nA full history."))
            }
            other => Err(GatewayError::InvalidRequest(format!("unknown model {}", other))),
        }
    }
}

struct NoopTools {
    spec: ToolSpec,
}

impl NoopTools {
    fn new() -> Self {
        Self {
            spec: ToolSpec::new().register(
                ToolDefinition::new("search_web", "Search the web")
                    .with_parameter(ToolParameter::new("query", "Search query", true)),
            ),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for NoopTools {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        ToolResult::success(&call.tool_name, "No results found.")
    }
}

#[derive(Default)]
struct MemoryStore {
    saved: Mutex<Vec<ResearchOutcome>>,
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn save(&self, outcome: &ResearchOutcome) -> Result<SavedReport, ReportStoreError> {
        self.saved.lock().unwrap().push(outcome.clone());
        Ok(SavedReport {
            run_dir: PathBuf::from("reports/20240101_000000"),
            final_report: PathBuf::from("reports/20240101_000000/final_report.md"),
            subagent_reports: Vec::new(),
        })
    }
}

#[tokio::test]
async fn suez_canal_run_survives_a_failed_worker() {
    let gateway = Arc::new(SuezGateway::default());
    let store = Arc::new(MemoryStore::default());
    let config = ResearchConfig::new(RoleModels {
        coordinator: ModelSpec::new("editor-model", "auto"),
        subagent: ModelSpec::new("worker-model", "together"),
        planner: ModelSpec::new("planner-model", "auto"),
        splitter: ModelSpec::new("splitter-model", "auto"),
    });
    let use_case =
        RunResearchUseCase::new(gateway.clone(), Arc::new(NoopTools::new()), store.clone(), config);

    let output = use_case
        .execute(Query::try_new("history of the Suez Canal").unwrap())
        .await
        .expect("run should succeed despite worker B failing");

    let results = &output.outcome.results;
    let summary: Vec<(&str, bool)> = results
        .iter()
        .map(|r| (r.id.as_str(), r.is_success()))
        .collect();
    assert_eq!(summary, vec![("A", true), ("B", false), ("C", true)]);
    assert!(results[1].result.starts_with("Error: "));
    assert!(results[1].result.contains("input exceeds context window"));

    let prompts = gateway.synthesis_prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1, "synthesis succeeds on the first attempt");
    let prompt = &prompts[0];
    assert!(prompt.contains("## Subtask: Construction (ID: A)"));
    assert!(prompt.contains("## Subtask: Suez Crisis (ID: B)\n\nError: "));
    assert!(prompt.contains("## Subtask: Modern Operations (ID: C)"));
    let a = prompt.find("(ID: A)").unwrap();
    let b = prompt.find("(ID: B)").unwrap();
    let c = prompt.find("(ID: C)").unwrap();
    assert!(a < b && b < c);

    assert!(!output.outcome.report.content().is_empty());
    assert_eq!(store.saved.lock().unwrap().len(), 1);
}

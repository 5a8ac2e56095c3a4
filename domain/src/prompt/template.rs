//! Prompt templates for the research pipeline

use crate::research::entities::Subtask;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the planner
    pub fn planner_system() -> &'static str {
        r#"You are a senior research strategist.
Given a research question, write a clear, structured research plan in markdown.

The plan should:
1. Restate the objective and scope of the research
2. Break the topic into distinct areas of investigation that can be researched independently
3. List the key questions to answer for each area
4. Point out which kinds of sources are most likely to be reliable
5. Describe how the findings should be combined into the final report

Do not answer the question yourself. Only produce the plan."#
    }

    /// System prompt for the task splitter
    pub fn splitter_system() -> &'static str {
        r#"You split a research plan into independent subtasks for a team of research agents.

Rules:
- Each subtask must be researchable on its own, without the results of the others.
- Together, the subtasks must cover the whole research plan.
- Avoid overlap between subtasks.
- Give every subtask a short unique id (e.g. "A", "B", "history"), a short title,
  and a detailed description telling the agent exactly what to investigate.

Respond only with a JSON object of the form:
{"subtasks": [{"id": "...", "title": "...", "description": "..."}]}"#
    }

    /// System prompt shared by worker agents and the chief editor
    pub fn agent_system() -> &'static str {
        r#"You are a meticulous research agent with access to web tools.

- Use `search_web` to find relevant sources and `scrape_url` to read them in full.
- Prefer primary and authoritative sources, and cross-check important claims.
- Cite the URLs you relied on.
- When you have gathered enough evidence, answer with your final report in markdown
  and do not call any more tools."#
    }

    /// Prompt for one worker, scoped to a single subtask
    pub fn subagent_prompt(user_query: &str, research_plan: &str, subtask: &Subtask) -> String {
        format!(
            r#"You are one member of a research team working on the following question:

{user_query}

The overall research plan is:

{research_plan}

Your assignment is only this subtask:

- ID: {id}
- Title: {title}
- Description: {description}

Research your subtask thoroughly using the web tools. Stay within its scope;
other agents cover the rest of the plan.

Write a detailed markdown report of your findings, with the sources you used."#,
            user_query = user_query,
            research_plan = research_plan,
            id = subtask.id,
            title = subtask.title,
            description = subtask.description,
        )
    }

    /// Prompt for the chief editor that writes the final report
    pub fn synthesis_prompt(user_query: &str, research_plan: &str, combined_reports: &str) -> String {
        format!(
            r#"You are the chief editor of a research team. Your agents researched the
following question:

{user_query}

They followed this research plan:

{research_plan}

Here are their reports, one section per subtask:

{combined_reports}

Write the final research report in markdown:
- Merge the findings into one coherent document that answers the question.
- Resolve contradictions between reports; use the web tools to verify doubtful claims.
- If a subtask report is an error notice, say which part of the plan is not covered
  instead of inventing content for it.
- Keep the sources cited by the agents."#,
            user_query = user_query,
            research_plan = research_plan,
            combined_reports = combined_reports,
        )
    }
}

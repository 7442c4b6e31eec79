//! First-run setup: asks for whatever the config file is missing.

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::sync::Arc;

use super::prompt::UserPrompt;
use crate::config::{
    ConfigStore, Settings, KEY_DEFAULT_PROJECT_ID, KEY_DEFAULT_SECTION_ID, KEY_LLM_TOKEN, KEY_SECTIONS,
    KEY_TODOIST_TOKEN, LLM_TOKEN_SKIPPED,
};
use crate::todoist::TaskProvider;

const SETUP_KEYS: [&str; 5] = [
    KEY_TODOIST_TOKEN,
    KEY_DEFAULT_PROJECT_ID,
    KEY_LLM_TOKEN,
    KEY_DEFAULT_SECTION_ID,
    KEY_SECTIONS,
];

fn is_missing(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Fill in missing configuration and return the resulting snapshot.
///
/// `connect` builds a task provider from the Todoist token. With `force`,
/// every stored value is discarded and asked for again.
pub async fn ensure_setup<P, F>(store: &dyn ConfigStore, prompt: &mut P, connect: F, force: bool) -> Result<Settings>
where
    P: UserPrompt,
    F: Fn(&str) -> Arc<dyn TaskProvider>,
{
    if force {
        for key in SETUP_KEYS {
            store.unset(key)?;
        }
    }

    let mut settings = store.snapshot()?;

    if is_missing(&settings.todoist_token) {
        let token = prompt.input(
            "Enter your Todoist API token [Open settings => Integrations => Developer]:",
            true,
        )?;
        store.set(KEY_TODOIST_TOKEN, json!(token))?;
        settings.todoist_token = Some(token);
    }
    let provider = connect(settings.todoist_token()?);

    if is_missing(&settings.default_project_id) {
        let projects = provider.list_projects().await.context("Error fetching projects")?;
        if projects.is_empty() {
            bail!("No projects found in your Todoist account");
        }
        println!("Found {} projects", projects.len());

        let names: Vec<String> = projects.iter().map(|p| p.name.clone()).collect();
        let choice = prompt.select("Select a Todoist project to use for standup summarization:", &names)?;
        let project_id = projects[choice].id.clone();
        store.set(KEY_DEFAULT_PROJECT_ID, json!(project_id))?;
        settings.default_project_id = Some(project_id);
    }

    if settings.llm_token.is_none() {
        let token = prompt.input("Enter your LLM API token (optional):", false)?;
        let stored = if token.is_empty() { LLM_TOKEN_SKIPPED.to_string() } else { token };
        store.set(KEY_LLM_TOKEN, json!(stored))?;
        settings.llm_token = Some(stored);
    }

    if is_missing(&settings.default_section_id) {
        let project_id = settings.project_id()?.to_string();
        let sections = provider.list_sections(&project_id).await.context("Error fetching sections")?;
        if sections.is_empty() {
            bail!("Project {} has no sections; create at least one in Todoist", project_id);
        }
        println!("Found {} sections", sections.len());

        let names: Vec<String> = sections.iter().map(|s| s.name.clone()).collect();
        let choice = prompt.select("Select a default section of the project to add a task:", &names)?;
        store.set(KEY_DEFAULT_SECTION_ID, json!(sections[choice].id))?;
        store.set(KEY_SECTIONS, serde_json::to_value(&sections)?)?;
        tracing::info!("Cached {} sections for project {}", sections.len(), project_id);
    }

    Ok(store.snapshot()?)
}

//! Todoist REST v1 client.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::provider::{ProviderError, Result, TaskProvider};
use super::types::{ActivityEvent, NewTask, Page, Project, Section, Task};

pub const TODOIST_BASE_URL: &str = "https://api.todoist.com/api/v1";

pub struct TodoistClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, TODOIST_BASE_URL)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn get(&self, path: &str) -> Result<RequestBuilder> {
        if self.token.trim().is_empty() {
            return Err(ProviderError::MissingToken);
        }
        Ok(self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token))
    }

    /// Fetch every page of a list endpoint, following `next_cursor`.
    async fn get_all<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self.get(path)?.query(query);
            if let Some(c) = &cursor {
                request = request.query(&[("cursor", c)]);
            }

            let page: Page<T> = read_json(request.send().await?).await?;
            items.extend(page.results);

            match follow_cursor(cursor.as_deref(), page.next_cursor)? {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        tracing::debug!("GET {} returned {} items", path, items.len());
        Ok(items)
    }
}

/// Next cursor to request, or `None` when the listing is complete.
/// Getting back the cursor just sent is a malformed response.
fn follow_cursor(current: Option<&str>, next: Option<String>) -> Result<Option<String>> {
    match next {
        Some(next) if next.is_empty() => Ok(None),
        Some(next) if current == Some(next.as_str()) => Err(ProviderError::ParseError(format!(
            "Pagination returned repeated cursor '{}'",
            next
        ))),
        next => Ok(next),
    }
}

fn activity_query(project_id: &str, since: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("parent_project_id", project_id.to_string()),
        ("object_type", "item".to_string()),
        ("event_type", "completed".to_string()),
        ("date_from", since.format("%Y-%m-%d").to_string()),
    ]
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::ApiError {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text)
        .map_err(|e| ProviderError::ParseError(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl TaskProvider for TodoistClient {
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        self.get_all("/tasks", &[("project_id", project_id.to_string())]).await
    }

    async fn list_sections(&self, project_id: &str) -> Result<Vec<Section>> {
        self.get_all("/sections", &[("project_id", project_id.to_string())]).await
    }

    async fn list_activity(&self, project_id: &str, since: NaiveDate) -> Result<Vec<ActivityEvent>> {
        self.get_all("/activities", &activity_query(project_id, since)).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_all("/projects", &[]).await
    }

    async fn add_task(&self, task: &NewTask) -> Result<Task> {
        if self.token.trim().is_empty() {
            return Err(ProviderError::MissingToken);
        }

        let response = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .bearer_auth(&self.token)
            .json(task)
            .send()
            .await?;

        read_json(response).await
    }
}

//! Todoist task-tracking service.

pub mod client;
pub mod provider;
pub mod types;

pub use client::TodoistClient;
pub use provider::{ProviderError, TaskProvider};
pub use types::{ActivityEvent, ActivityExtra, NewTask, Project, Section, Task};

//! standup-cli library root.

pub mod cli;
pub mod config;
pub mod error;
pub mod ip;
pub mod llm;
pub mod logging;
pub mod standup;
pub mod todoist;

pub use cli::Commands;
pub use config::{ConfigStore, JsonConfigStore, Settings};
pub use error::{Error, Result};
pub use llm::{GenerationError, TextGenerator};
pub use standup::{SummaryAssembler, SummaryGenerator, TaskSummaryInput};
pub use todoist::{ProviderError, TaskProvider, TodoistClient};

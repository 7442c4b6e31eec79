//! CLI commands for standup-cli using clap.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::sync::Arc;

pub mod prompt;
pub mod setup;
pub mod table;

use crate::config::{JsonConfigStore, Settings};
use crate::llm;
use crate::standup::{classify, render_prompt, sort_sections, SummaryAssembler, SummaryGenerator};
use crate::todoist::{NewTask, Section, Task, TaskProvider, TodoistClient};
use prompt::{stdin_prompt, UserPrompt};

/// Priority 4 is "normal" in the Todoist API.
const DEFAULT_TASK_PRIORITY: u8 = 4;

/// Upper bound for `standup --days`.
const MAX_WINDOW_DAYS: i64 = 3650;

/// standup - Todoist tasks in, standup summary out.
#[derive(Parser)]
#[command(name = "standup")]
#[command(version)]
#[command(about = "Add and view Todoist tasks and write your daily standup", long_about = None)]
pub struct Commands {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the setup prompts for anything not configured yet
    Setup {
        /// Forget stored values and ask for everything again
        #[arg(long)]
        force: bool,
    },

    /// Add a task to the default project and section
    Add {
        /// Task title (prompted when omitted)
        #[arg(long, short)]
        title: Option<String>,

        /// Task description (prompted when omitted)
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Show the default project as a board
    View,

    /// Generate a standup summary
    Standup {
        /// Days of completed activity to include
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(0..=MAX_WINDOW_DAYS))]
        days: i64,

        /// Start of the activity window (YYYY-MM-DD); overrides --days
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Print the prompt instead of calling a text generation backend
        #[arg(long)]
        show_prompt: bool,
    },

    /// Show your public IP and copy it to the clipboard
    Ip,
}

impl Command {
    /// Whether setup should ask again for values that are already stored.
    fn forces_setup(&self) -> bool {
        matches!(self, Command::Setup { force: true })
    }
}

impl Commands {
    /// Run the command. Every command, `ip` included, completes setup first.
    pub async fn run(&self) -> Result<()> {
        let (settings, provider) = load_configured(self.command.forces_setup()).await?;

        match &self.command {
            Command::Setup { .. } => cmd_setup(&settings),
            Command::Add { title, description } => cmd_add(&settings, provider.as_ref(), title, description).await,
            Command::View => cmd_view(&settings, provider.as_ref()).await,
            Command::Standup { days, since, show_prompt } => {
                cmd_standup(&settings, provider, *days, *since, *show_prompt).await
            }
            Command::Ip => cmd_ip().await,
        }
    }
}

fn connect(token: &str) -> Arc<dyn TaskProvider> {
    Arc::new(TodoistClient::new(token))
}

/// Complete any missing setup, then take the one settings snapshot for this run.
async fn load_configured(force: bool) -> Result<(Settings, Arc<dyn TaskProvider>)> {
    let store = JsonConfigStore::open_default()?;
    let mut prompt = stdin_prompt();
    let settings = setup::ensure_setup(&store, &mut prompt, connect, force).await?;
    let provider = connect(settings.todoist_token()?);
    Ok((settings, provider))
}

// Command implementations

fn cmd_setup(settings: &Settings) -> Result<()> {
    let path = crate::config::get_config_path()?;

    println!("Setup complete. Configuration saved to {}", path.display());
    println!("  Project: {}", settings.project_id()?);
    println!("  Default section: {}", settings.section_id()?);
    println!("  Sections cached: {}", settings.sections.len());
    Ok(())
}

async fn cmd_add(
    settings: &Settings,
    provider: &dyn TaskProvider,
    title: &Option<String>,
    description: &Option<String>,
) -> Result<()> {
    let mut prompt = stdin_prompt();

    let title = match title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t.to_string(),
        None => prompt.input("Enter Title:", true)?,
    };
    let description = match description {
        Some(d) => d.trim().to_string(),
        None => prompt.input("Enter Description (Optional):", false)?,
    };

    let new_task = build_new_task(settings, title, description)?;
    let created = provider.add_task(&new_task).await?;
    tracing::info!("Added task {} to project {}", created.id, new_task.project_id);
    println!("Task added to the project: {}", created.content);
    Ok(())
}

fn build_new_task(settings: &Settings, title: String, description: String) -> crate::Result<NewTask> {
    Ok(NewTask {
        content: title,
        description,
        project_id: settings.project_id()?.to_string(),
        section_id: Some(settings.section_id()?.to_string()),
        priority: DEFAULT_TASK_PRIORITY,
    })
}

async fn cmd_view(settings: &Settings, provider: &dyn TaskProvider) -> Result<()> {
    let tasks = provider.list_tasks(settings.project_id()?).await?;

    let (headers, columns) = board_columns(&tasks, &settings.sections);
    println!("{}", table::render_columns(&headers, &columns));
    Ok(())
}

fn task_cell(task: &Task) -> String {
    if task.checked {
        format!("{} ✓", task.content)
    } else {
        task.content.clone()
    }
}

/// Columns for `view`: one per cached section, or a single list without them.
fn board_columns(tasks: &[Task], sections: &[Section]) -> (Vec<String>, Vec<Vec<String>>) {
    if sections.is_empty() {
        return (vec!["Tasks".to_string()], vec![tasks.iter().map(task_cell).collect()]);
    }

    let headers = sort_sections(sections).into_iter().map(|s| s.name).collect();
    let columns = classify(tasks, sections)
        .into_iter()
        .map(|bucket| bucket.tasks.iter().map(task_cell).collect())
        .collect();
    (headers, columns)
}

async fn cmd_standup(
    settings: &Settings,
    provider: Arc<dyn TaskProvider>,
    days: i64,
    since: Option<NaiveDate>,
    show_prompt: bool,
) -> Result<()> {
    let project_id = settings.project_id()?;

    println!("Generating standup summary...");
    let assembler = SummaryAssembler::new(provider).with_window_days(days);
    let input = match since {
        Some(date) => assembler.assemble_since(project_id, date).await?,
        None => assembler.assemble(project_id).await?,
    };

    if show_prompt {
        println!("\n{}", render_prompt(&input));
        return Ok(());
    }

    if input.is_empty() {
        tracing::warn!("No tasks found for the summary; the backend will only see empty lists");
    }

    let generator = SummaryGenerator::new(llm::primary_generator(settings), llm::fallback_generator());
    let summary = generator.generate(&input).await;

    println!("\nStandup Summary:");
    println!("{}", summary);
    Ok(())
}

async fn cmd_ip() -> Result<()> {
    let info = crate::ip::lookup().await?;
    crate::ip::copy_to_clipboard(&info.ip).await?;
    println!("{} ({}) (copied to clipboard)", info.ip, info.loc);
    Ok(())
}

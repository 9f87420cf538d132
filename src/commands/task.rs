use super::sessions::parse_date;
use crate::{
    api::OpenAi,
    db::{ai_logs::AiLogs, tasks::Tasks},
    libs::{
        ai::Assistant,
        config::Config,
        error::StoreError,
        identity::Identity,
        messages::Message,
        task::{NewTask, Priority, TaskUpdate},
        view::View,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks, newest first
    List,
    /// Add a task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(short, long)]
        category: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Change fields of a task
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a task as completed
    Done { id: i64 },
    /// Mark a task as not completed
    Undo { id: i64 },
    /// Delete a task
    Delete { id: i64 },
    /// Create tasks from a natural-language description
    Parse { input: String },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let user_id = Identity::new().current()?;
    let mut tasks_db = Tasks::new()?;

    match args.command.unwrap_or(TaskCommand::List) {
        TaskCommand::List => {
            let tasks = tasks_db.list(&user_id)?;
            if tasks.is_empty() {
                msg_info!(Message::NoTasksFound);
                return Ok(());
            }
            View::tasks(&tasks)
        }
        TaskCommand::Add {
            title,
            description,
            priority,
            category,
            due,
        } => {
            let task = tasks_db.create(
                &user_id,
                &NewTask {
                    title,
                    description,
                    priority,
                    category,
                    due_date: due.as_deref().map(parse_date).transpose()?,
                },
            )?;
            msg_success!(Message::TaskCreated(task.id, task.title));
            Ok(())
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            priority,
            category,
            due,
        } => {
            let update = TaskUpdate {
                title,
                description,
                priority,
                category,
                due_date: due.as_deref().map(parse_date).transpose()?,
                completed: None,
            };
            if update.is_empty() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            let task = tasks_db.update(id, &user_id, &update)?;
            msg_success!(Message::TaskUpdated(task.id));
            Ok(())
        }
        TaskCommand::Done { id } => {
            tasks_db.update(id, &user_id, &TaskUpdate::completed(true))?;
            msg_success!(Message::TaskCompleted(id));
            Ok(())
        }
        TaskCommand::Undo { id } => {
            tasks_db.update(id, &user_id, &TaskUpdate::completed(false))?;
            msg_success!(Message::TaskReopened(id));
            Ok(())
        }
        TaskCommand::Delete { id } => {
            if !tasks_db.delete(id, &user_id)? {
                return Err(StoreError::NotFound("Task", id).into());
            }
            msg_success!(Message::TaskDeleted(id));
            Ok(())
        }
        TaskCommand::Parse { input } => {
            let assistant = Assistant::new(OpenAi::new(&Config::read()?.ai())?);
            let created = assistant
                .create_tasks_from_text(&user_id, &input, &mut tasks_db, &mut AiLogs::new()?)
                .await?;
            msg_success!(Message::TasksParsed(created.len()));
            if !created.is_empty() {
                View::tasks(&created)?;
            }
            Ok(())
        }
    }
}

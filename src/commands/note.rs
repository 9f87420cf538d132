use crate::{
    api::OpenAi,
    db::{
        ai_logs::AiLogs,
        notes::{NoteUpdate, Notes},
    },
    libs::{ai::Assistant, config::Config, error::StoreError, identity::Identity, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct NoteArgs {
    #[command(subcommand)]
    command: Option<NoteCommand>,
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    /// List notes, newest first
    List,
    /// Add a note
    Add { title: String, content: String },
    /// Print a note with its summary
    Show { id: i64 },
    /// Change the title or content of a note
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete { id: i64 },
    /// Summarize a note with AI and store the summary
    Summarize { id: i64 },
}

pub async fn cmd(args: NoteArgs) -> Result<()> {
    let user_id = Identity::new().current()?;
    let mut notes_db = Notes::new()?;

    match args.command.unwrap_or(NoteCommand::List) {
        NoteCommand::List => {
            let notes = notes_db.list(&user_id)?;
            if notes.is_empty() {
                msg_info!(Message::NoNotesFound);
                return Ok(());
            }
            View::notes(&notes)
        }
        NoteCommand::Add { title, content } => {
            let note = notes_db.create(&user_id, &title, &content)?;
            msg_success!(Message::NoteCreated(note.id, note.title));
            Ok(())
        }
        NoteCommand::Show { id } => {
            let note = notes_db.get(id, &user_id)?.ok_or(StoreError::NotFound("Note", id))?;
            msg_print!(Message::NoteBody(note.title, note.content));
            if let Some(summary) = note.summary {
                msg_print!(Message::NoteSummary(summary), true);
            }
            Ok(())
        }
        NoteCommand::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                msg_info!(Message::NothingToUpdate);
                return Ok(());
            }
            let update = NoteUpdate {
                title,
                content,
                summary: None,
            };
            notes_db.update(id, &user_id, &update)?;
            msg_success!(Message::NoteUpdated(id));
            Ok(())
        }
        NoteCommand::Delete { id } => {
            if !notes_db.delete(id, &user_id)? {
                return Err(StoreError::NotFound("Note", id).into());
            }
            msg_success!(Message::NoteDeleted(id));
            Ok(())
        }
        NoteCommand::Summarize { id } => {
            let assistant = Assistant::new(OpenAi::new(&Config::read()?.ai())?);
            let note = assistant
                .summarize_stored_note(&user_id, id, &mut notes_db, &mut AiLogs::new()?)
                .await?;
            msg_print!(Message::NoteSummary(note.summary.unwrap_or_default()), true);
            Ok(())
        }
    }
}

use crate::{
    api::OpenAi,
    db::{
        ai_logs::AiLogs,
        content_ideas::{ContentIdeas, Platform},
    },
    libs::{ai::Assistant, config::Config, error::StoreError, identity::Identity, messages::Message, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct IdeaArgs {
    #[command(subcommand)]
    command: Option<IdeaCommand>,
}

#[derive(Debug, Subcommand)]
enum IdeaCommand {
    /// List content ideas, newest first
    List,
    /// Generate ideas for a niche with AI
    Generate {
        niche: String,
        #[arg(short, long, value_enum, default_value_t = Platform::Youtube)]
        platform: Platform,
    },
    /// Mark an idea as saved
    Save { id: i64 },
    /// Remove the saved mark from an idea
    Unsave { id: i64 },
    /// Delete an idea
    Delete { id: i64 },
}

pub async fn cmd(args: IdeaArgs) -> Result<()> {
    let user_id = Identity::new().current()?;
    let mut ideas_db = ContentIdeas::new()?;

    match args.command.unwrap_or(IdeaCommand::List) {
        IdeaCommand::List => {
            let ideas = ideas_db.list(&user_id)?;
            if ideas.is_empty() {
                msg_info!(Message::NoIdeasFound);
                return Ok(());
            }
            View::ideas(&ideas)
        }
        IdeaCommand::Generate { niche, platform } => {
            let assistant = Assistant::new(OpenAi::new(&Config::read()?.ai())?);
            let ideas = assistant
                .create_content_ideas(&user_id, &niche, platform, &mut ideas_db, &mut AiLogs::new()?)
                .await?;
            msg_success!(Message::IdeasGenerated(ideas.len()));
            if !ideas.is_empty() {
                View::ideas(&ideas)?;
            }
            Ok(())
        }
        IdeaCommand::Save { id } => {
            ideas_db.set_saved(id, &user_id, true)?;
            msg_success!(Message::IdeaSaved(id));
            Ok(())
        }
        IdeaCommand::Unsave { id } => {
            ideas_db.set_saved(id, &user_id, false)?;
            msg_success!(Message::IdeaUnsaved(id));
            Ok(())
        }
        IdeaCommand::Delete { id } => {
            if !ideas_db.delete(id, &user_id)? {
                return Err(StoreError::NotFound("Content idea", id).into());
            }
            msg_success!(Message::IdeaDeleted(id));
            Ok(())
        }
    }
}

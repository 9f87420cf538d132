use crate::{
    api::OpenAi,
    db::{ai_logs::AiLogs, tasks::Tasks},
    libs::{ai::Assistant, config::Config, identity::Identity, messages::Message},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Available time, e.g. "9am-12pm, 2pm-6pm" (default 9am-5pm)
    #[arg(short, long)]
    free: Option<String>,
}

pub async fn cmd(args: ScheduleArgs) -> Result<()> {
    let user_id = Identity::new().current()?;
    let assistant = Assistant::new(OpenAi::new(&Config::read()?.ai())?);

    let schedule = assistant
        .schedule_for(&user_id, args.free.as_deref(), &mut Tasks::new()?, &mut AiLogs::new()?)
        .await?;

    msg_print!(Message::ScheduleHeader, true);
    msg_print!(schedule);
    Ok(())
}

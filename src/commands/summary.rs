use crate::{
    api::OpenAi,
    db::{ai_logs::AiLogs, daily_summaries::DailySummaries, focus_sessions::FocusSessions, notes::Notes, tasks::Tasks},
    libs::{ai::Assistant, config::Config, identity::Identity, messages::Message, summary::TodayStats, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Ask the AI for a new summary of today and store it
    #[arg(short, long)]
    generate: bool,
}

pub async fn cmd(args: SummaryArgs) -> Result<()> {
    let user_id = Identity::new().current()?;
    let now = Local::now().naive_local();
    let stats = TodayStats::load(&mut Tasks::new()?, &mut FocusSessions::new()?, &mut Notes::new()?, &user_id, now)?;

    View::today(&stats)?;

    let mut summaries_db = DailySummaries::new()?;
    let summary = if args.generate {
        let assistant = Assistant::new(OpenAi::new(&Config::read()?.ai())?);
        Some(
            assistant
                .create_daily_summary(&user_id, now.date(), &stats, &mut summaries_db, &mut AiLogs::new()?)
                .await?,
        )
    } else {
        summaries_db.get_for_day(&user_id, now.date())?
    };

    match summary {
        Some(summary) => msg_print!(Message::DailySummaryText(summary.summary), true),
        None => msg_info!(Message::NoDailySummary),
    }
    Ok(())
}

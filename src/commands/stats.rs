use crate::{
    db::focus_sessions::FocusSessions,
    libs::{identity::Identity, view::View},
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print the stats as JSON
    #[arg(long)]
    json: bool,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let user_id = Identity::new().current()?;
    let stats = FocusSessions::new()?.stats(&user_id, Local::now().naive_local())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    View::focus_stats(&stats)
}

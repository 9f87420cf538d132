use crate::{
    db::focus_sessions::FocusSessions,
    libs::{focus_session::SessionStore, identity::Identity, messages::Message, view::View},
    msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Only sessions started on this date (YYYY-MM-DD or "today")
    #[arg(short, long)]
    date: Option<String>,
    /// Record the current time as the end of session ID
    #[arg(long, value_name = "ID")]
    end: Option<i64>,
}

pub fn cmd(args: SessionsArgs) -> Result<()> {
    let user_id = Identity::new().current()?;
    let mut sessions_db = FocusSessions::new()?;

    if let Some(id) = args.end {
        let session = sessions_db.update_ended_at(id, &user_id, Local::now().naive_local())?;
        msg_success!(Message::SessionEnded(session.id));
        return Ok(());
    }

    let sessions = match args.date.as_deref() {
        Some(date) => sessions_db.list_by_day(&user_id, parse_date(date)?)?,
        None => sessions_db.list_by_user(&user_id)?,
    };

    if sessions.is_empty() {
        msg_info!(Message::NoSessionsFound);
        return Ok(());
    }

    View::sessions(&sessions)
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    if value == "today" {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(value.to_string())))
}

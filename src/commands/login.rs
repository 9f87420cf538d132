use crate::{
    db::users::{UpsertUser, Users},
    libs::{identity::Identity, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// User id to sign in as
    #[arg(required = true)]
    user_id: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
}

pub fn cmd(login_args: LoginArgs) -> Result<()> {
    let user = Users::new()?.upsert(&UpsertUser {
        id: login_args.user_id,
        email: login_args.email,
        first_name: login_args.first_name,
        last_name: login_args.last_name,
    })?;

    Identity::new().login(&user.id)?;

    msg_success!(Message::LoggedIn(user.display_name()));
    Ok(())
}

use crate::{
    libs::{identity::Identity, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    if Identity::new().logout()? {
        msg_success!(Message::LoggedOut);
    } else {
        msg_info!(Message::NotLoggedIn);
    }
    Ok(())
}

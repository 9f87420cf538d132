use crate::{
    db::users::Users,
    libs::{identity::Identity, messages::Message},
    msg_print,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let user_id = Identity::new().current()?;

    match Users::new()?.get(&user_id)? {
        Some(user) => msg_print!(Message::CurrentUser(user.display_name(), user.id)),
        None => msg_print!(Message::CurrentUser(user_id.clone(), user_id)),
    }
    Ok(())
}

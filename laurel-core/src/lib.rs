use laurel_database::Database;
use laurel_leveling::{LevelingConfig, SuperAdmins};
use laurel_utils::triggers::TriggerWords;

pub type Error = anyhow::Error;

/// State shared with every command and event handler.
#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub leveling: LevelingConfig,
    pub super_admins: SuperAdmins,
    pub triggers: TriggerWords,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;

pub mod admin;
pub mod leveling;
pub mod utility;

use laurel_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    leveling::progress::META,
    leveling::leaderboard::META,
    leveling::setlevel::META,
    leveling::addxp::META,
    admin::addadmin::META,
    admin::removeadmin::META,
    admin::showadmins::META,
    admin::deleteuser::META,
    admin::deleteusers::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::usage::usage(),
        leveling::progress::progress(),
        leveling::leaderboard::leaderboard(),
        leveling::setlevel::setlevel(),
        leveling::addxp::addxp(),
        admin::addadmin::addadmin(),
        admin::removeadmin::removeadmin(),
        admin::showadmins::showadmins(),
        admin::deleteuser::deleteuser(),
        admin::deleteusers::deleteusers(),
    ]
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, commands};

    #[test]
    fn every_registered_command_has_metadata() {
        let registered = commands();
        assert_eq!(registered.len(), COMMANDS.len());
        for command in &registered {
            assert!(
                COMMANDS.iter().any(|meta| meta.name == command.name),
                "missing metadata for `{}`",
                command.name
            );
        }
    }

    #[test]
    fn usage_lines_use_prefix() {
        for meta in COMMANDS {
            assert!(meta.usage.starts_with(&format!("!{}", meta.name)), "{}", meta.usage);
        }
    }
}

use poise::serenity_prelude as serenity;

/// Listings: leaderboard, admin list, help.
pub const INFO_EMBED_COLOR: u32 = 0x34_98_DB;
pub const SUCCESS_EMBED_COLOR: u32 = 0x2E_CC_71;
/// Denials, conflicts and not-found replies.
pub const ERROR_EMBED_COLOR: u32 = 0xE7_4C_3C;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

impl Tone {
    pub fn color(self) -> u32 {
        match self {
            Self::Info => INFO_EMBED_COLOR,
            Self::Success => SUCCESS_EMBED_COLOR,
            Self::Error => ERROR_EMBED_COLOR,
        }
    }
}

/// Build a one-line status embed with an optional footer.
pub fn status_embed(tone: Tone, headline: impl Into<String>, footer: Option<&str>) -> serenity::CreateEmbed {
    let builder = serenity::CreateEmbed::new()
        .color(tone.color())
        .title(headline);

    match footer {
        Some(text) if !text.is_empty() => {
            builder.footer(serenity::CreateEmbedFooter::new(text.to_owned()))
        }
        _ => builder,
    }
}

pub fn success_embed(headline: impl Into<String>) -> serenity::CreateEmbed {
    status_embed(Tone::Success, headline, None)
}

pub fn error_embed(headline: impl Into<String>) -> serenity::CreateEmbed {
    status_embed(Tone::Error, headline, None)
}

#[cfg(test)]
mod tests {
    use super::{ERROR_EMBED_COLOR, INFO_EMBED_COLOR, SUCCESS_EMBED_COLOR, Tone};

    #[test]
    fn tones_map_to_colors() {
        assert_eq!(Tone::Info.color(), INFO_EMBED_COLOR);
        assert_eq!(Tone::Success.color(), SUCCESS_EMBED_COLOR);
        assert_eq!(Tone::Error.color(), ERROR_EMBED_COLOR);
    }
}

/// Break user-supplied text so it cannot ping anyone.
pub fn neutralize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Body of a progress embed, e.g. `Level: 3\nXP: 15/60 (25%)\nRemaining XP to next level: 45`.
pub fn progress_description(level: i64, xp: u64, required_xp: u64, percent: u64, remaining_xp: u64) -> String {
    format!(
        "Level: {}\nXP: {}/{} ({}%)\nRemaining XP to next level: {}",
        level, xp, required_xp, percent, remaining_xp
    )
}

/// Field value for a leaderboard entry.
pub fn standing_value(level: i64, xp: u64, rank: Option<usize>) -> String {
    match rank {
        Some(rank) => format!("Level: {}\nXP: {}\nRank: {}", level, xp, rank),
        None => format!("Level: {}\nXP: {}", level, xp),
    }
}

/// Ten-segment text bar for a percentage, clamped to 0..=100.
pub fn progress_bar(percent: u64) -> String {
    let filled = (percent.min(100) / 10) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::{neutralize_mentions, progress_bar, progress_description, standing_value};

    #[test]
    fn mentions_are_broken() {
        assert_eq!(neutralize_mentions("@everyone"), "@\u{200B}everyone");
        assert_eq!(neutralize_mentions("plain"), "plain");
    }

    #[test]
    fn progress_description_layout() {
        assert_eq!(
            progress_description(3, 15, 60, 25, 45),
            "Level: 3\nXP: 15/60 (25%)\nRemaining XP to next level: 45"
        );
    }

    #[test]
    fn standing_value_with_and_without_rank() {
        assert_eq!(standing_value(4, 2, None), "Level: 4\nXP: 2");
        assert_eq!(standing_value(4, 2, Some(9)), "Level: 4\nXP: 2\nRank: 9");
    }

    #[test]
    fn progress_bar_segments() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░");
        assert_eq!(progress_bar(45), "████░░░░░░");
        assert_eq!(progress_bar(250), "██████████");
    }
}

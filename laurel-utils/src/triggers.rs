use std::env;

pub const DEFAULT_TRIGGER_WORDS: &[&str] = &["thanks", "thank you", "thx", "ty"];

/// Lowercased phrases that make a message eligible for XP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerWords {
    words: Vec<String>,
}

impl Default for TriggerWords {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_WORDS.iter().copied())
    }
}

impl TriggerWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        words.sort_unstable();
        words.dedup();

        Self { words }
    }

    /// Parse a comma separated list. Phrases may contain spaces.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Read `XP_TRIGGER_WORDS`, falling back to the defaults when unset or empty.
    pub fn from_env() -> Self {
        match env::var("XP_TRIGGER_WORDS") {
            Ok(raw) => {
                let parsed = Self::parse(&raw);
                if parsed.is_empty() { Self::default() } else { parsed }
            }
            Err(_) => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Substring match against the lowercased message content.
    pub fn matches(&self, content: &str) -> bool {
        let content = content.to_lowercase();
        self.words.iter().any(|word| content.contains(word.as_str()))
    }
}

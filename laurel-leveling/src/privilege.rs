use std::collections::BTreeSet;
use std::env;

use anyhow::Context as _;

/// Fixed, out-of-band super-admin identities.
///
/// Never persisted; supplied at startup through `SUPER_ADMIN_IDS`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuperAdmins {
    ids: BTreeSet<u64>,
}

impl SuperAdmins {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Parse a comma and/or whitespace separated list of user ids.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let ids = raw
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u64>()
                    .with_context(|| format!("invalid super admin id `{token}`"))
            })
            .collect::<anyhow::Result<BTreeSet<u64>>>()?;

        Ok(Self { ids })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        match env::var("SUPER_ADMIN_IDS") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn contains(&self, user_id: u64) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Privilege tiers, ordered from least to most powerful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Privilege {
    Member,
    /// Stored membership. May mutate XP and levels.
    Admin,
    /// Implicitly an admin; may also manage admins and delete progress.
    SuperAdmin,
}

impl Privilege {
    pub fn resolve(is_super_admin: bool, is_admin: bool) -> Self {
        if is_super_admin {
            Self::SuperAdmin
        } else if is_admin {
            Self::Admin
        } else {
            Self::Member
        }
    }

    pub fn satisfies(self, required: Privilege) -> bool {
        self >= required
    }
}

#[cfg(test)]
mod tests {
    use super::{Privilege, SuperAdmins};

    #[test]
    fn parses_mixed_separators() {
        let admins = SuperAdmins::parse(" 123, 456 789,,").expect("valid ids");
        assert_eq!(admins.len(), 3);
        assert!(admins.contains(123));
        assert!(admins.contains(789));
        assert!(!admins.contains(1));
    }

    #[test]
    fn empty_list_is_allowed() {
        assert!(SuperAdmins::parse("").expect("empty").is_empty());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(SuperAdmins::parse("123,abc").is_err());
    }

    #[test]
    fn super_admin_wins_over_membership() {
        assert_eq!(Privilege::resolve(true, false), Privilege::SuperAdmin);
        assert_eq!(Privilege::resolve(true, true), Privilege::SuperAdmin);
        assert_eq!(Privilege::resolve(false, true), Privilege::Admin);
        assert_eq!(Privilege::resolve(false, false), Privilege::Member);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Privilege::SuperAdmin.satisfies(Privilege::Admin));
        assert!(Privilege::Admin.satisfies(Privilege::Admin));
        assert!(!Privilege::Admin.satisfies(Privilege::SuperAdmin));
        assert!(!Privilege::Member.satisfies(Privilege::Admin));
    }
}

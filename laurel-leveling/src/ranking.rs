use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub user_id: u64,
    pub name: String,
    pub level: i64,
    pub xp: u64,
}

impl Standing {
    /// Leaderboard order: level desc, then xp desc, then user id asc.
    pub fn leaderboard_cmp(&self, other: &Self) -> Ordering {
        other
            .level
            .cmp(&self.level)
            .then_with(|| other.xp.cmp(&self.xp))
            .then_with(|| self.user_id.cmp(&other.user_id))
    }

    fn outranks(&self, level: i64, xp: u64) -> bool {
        self.level > level || (self.level == level && self.xp > xp)
    }
}

/// 1-based rank: one more than the number of standings strictly ahead.
pub fn rank_of(standings: &[Standing], level: i64, xp: u64) -> usize {
    standings
        .iter()
        .filter(|standing| standing.outranks(level, xp))
        .count()
        + 1
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedStanding {
    pub rank: usize,
    pub standing: Standing,
    pub is_requester: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequesterStanding {
    /// Already listed in the top entries.
    Listed,
    Ranked { standing: Standing, rank: usize },
    /// No progress recorded.
    Unranked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaderboard {
    pub top: Vec<RankedStanding>,
    pub requester: RequesterStanding,
}

impl Leaderboard {
    pub fn build(mut standings: Vec<Standing>, requester_id: u64, size: usize) -> Self {
        standings.sort_by(Standing::leaderboard_cmp);

        let mut top: Vec<RankedStanding> = Vec::with_capacity(size.min(standings.len()));
        for (index, standing) in standings.iter().take(size).enumerate() {
            // Entries tied with their predecessor share its rank.
            let rank = match top.last() {
                Some(previous)
                    if previous.standing.level == standing.level
                        && previous.standing.xp == standing.xp =>
                {
                    previous.rank
                }
                _ => index + 1,
            };

            top.push(RankedStanding {
                rank,
                standing: standing.clone(),
                is_requester: standing.user_id == requester_id,
            });
        }

        let requester = if top.iter().any(|entry| entry.is_requester) {
            RequesterStanding::Listed
        } else {
            match standings.iter().find(|standing| standing.user_id == requester_id) {
                Some(standing) => RequesterStanding::Ranked {
                    rank: rank_of(&standings, standing.level, standing.xp),
                    standing: standing.clone(),
                },
                None => RequesterStanding::Unranked,
            }
        };

        Self { top, requester }
    }
}

#[cfg(test)]
mod tests {
    use super::{Leaderboard, RequesterStanding, Standing, rank_of};

    fn standing(user_id: u64, level: i64, xp: u64) -> Standing {
        Standing {
            user_id,
            name: format!("user{user_id}"),
            level,
            xp,
        }
    }

    #[test]
    fn orders_by_level_then_xp() {
        let board = Leaderboard::build(
            vec![standing(1, 2, 5), standing(2, 3, 0), standing(3, 2, 9)],
            99,
            5,
        );
        let ids: Vec<u64> = board.top.iter().map(|entry| entry.standing.user_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(board.top[0].rank, 1);
        assert_eq!(board.requester, RequesterStanding::Unranked);
    }

    #[test]
    fn ties_share_rank() {
        let standings = vec![standing(1, 4, 10), standing(2, 4, 10), standing(3, 1, 0)];
        assert_eq!(rank_of(&standings, 4, 10), 1);
        assert_eq!(rank_of(&standings, 1, 0), 3);

        let board = Leaderboard::build(standings, 3, 5);
        let ranks: Vec<usize> = board.top.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    #[test]
    fn requester_outside_top_gets_rank_line() {
        let standings = (1..=8).map(|id| standing(id, id as i64, 0)).collect();
        let board = Leaderboard::build(standings, 2, 5);
        assert_eq!(board.top.len(), 5);
        assert_eq!(
            board.requester,
            RequesterStanding::Ranked {
                standing: standing(2, 2, 0),
                rank: 7,
            }
        );
    }

    #[test]
    fn requester_inside_top_is_marked_once() {
        let board = Leaderboard::build(vec![standing(1, 1, 0), standing(2, 2, 0)], 1, 5);
        assert_eq!(board.requester, RequesterStanding::Listed);
        assert!(board.top[1].is_requester);
        assert!(!board.top[0].is_requester);
    }
}

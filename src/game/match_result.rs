//! Match result and ranking system
//!
//! Computes final standings from player scores.

use serde::Serialize;

use crate::game::player::PlayerId;
use crate::game::state::Game;

/// Match result information
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// None when nobody leads outright
    pub winner_id: Option<PlayerId>,
    pub winner_name: Option<String>,
    pub rankings: Vec<PlayerRanking>,
    pub ticks_played: u64,
}

/// Player ranking in match results
#[derive(Debug, Clone, Serialize)]
pub struct PlayerRanking {
    pub player_id: PlayerId,
    pub name: String,
    pub rank: u32,
    pub score: u32,
}

/// Determine match result from game state
pub fn determine_result(game: &Game) -> MatchResult {
    let mut rankings: Vec<PlayerRanking> = game
        .players()
        .iter()
        .map(|p| PlayerRanking {
            player_id: p.id,
            name: p.name.clone(),
            rank: 0,
            score: p.score,
        })
        .collect();

    // Score descending; stable sort keeps join order among equals
    rankings.sort_by(|a, b| b.score.cmp(&a.score));

    for (ranking, rank) in rankings.iter_mut().zip(1u32..) {
        ranking.rank = rank;
    }

    let tied = matches!(rankings.as_slice(), [first, second, ..] if first.score == second.score);
    let (winner_id, winner_name) = match rankings.first() {
        Some(first) if !tied => (Some(first.player_id), Some(first.name.clone())),
        _ => (None, None),
    };

    MatchResult {
        winner_id,
        winner_name,
        rankings,
        ticks_played: game.tick(),
    }
}

//! Round configuration: hand-authored opening rounds, procedural waves, bosses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest playable board
pub const MAX_BOARD: i32 = 8;

/// Round win condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    CaptureCount,
    Check,
}

/// AI difficulty label shown alongside the search depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        };
        f.write_str(s)
    }
}

/// Boss modifiers, selected cyclically on every third round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boss {
    Wall,
    Mirror,
    Clock,
    Fog,
    Swarm,
    Fortress,
}

impl Boss {
    pub const ROSTER: [Boss; 6] = [Boss::Wall, Boss::Mirror, Boss::Clock, Boss::Fog, Boss::Swarm, Boss::Fortress];

    pub fn name(self) -> &'static str {
        match self {
            Boss::Wall => "The Wall",
            Boss::Mirror => "The Mirror",
            Boss::Clock => "The Clock",
            Boss::Fog => "The Fog",
            Boss::Swarm => "The Swarm",
            Boss::Fortress => "The Fortress",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Boss::Wall => "Enemy pawns are immune for the first 3 turns.",
            Boss::Mirror => "Enemies copy your movement mods.",
            Boss::Clock => "Turn limit halved.",
            Boss::Fog => "Enemy pieces hidden until adjacent to yours.",
            Boss::Swarm => "Double enemy count, double score target.",
            Boss::Fortress => "Enemy king surrounded by rooks in a defensive formation.",
        }
    }
}

/// Per-round parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub board_w: i32,
    pub board_h: i32,
    pub enemy_count: u32,
    pub target: u32,
    pub objective: Objective,
    pub turn_limit: u32,
    pub enemy_actions: u32,
    /// Falls back to [`ai_depth_for_round`] when absent
    pub ai_depth: Option<u32>,
    pub ai_difficulty: Option<Difficulty>,
    pub boss: Option<Boss>,
}

/// Hand-authored opening rounds
pub const BASE_ROUNDS: [RoundConfig; 3] = [
    RoundConfig {
        board_w: 6,
        board_h: 6,
        enemy_count: 5,
        target: 2,
        objective: Objective::CaptureCount,
        turn_limit: 14,
        enemy_actions: 1,
        ai_depth: Some(1),
        ai_difficulty: Some(Difficulty::Easy),
        boss: None,
    },
    RoundConfig {
        board_w: 7,
        board_h: 7,
        enemy_count: 7,
        target: 1,
        objective: Objective::Check,
        turn_limit: 15,
        enemy_actions: 1,
        ai_depth: Some(2),
        ai_difficulty: Some(Difficulty::Normal),
        boss: None,
    },
    RoundConfig {
        board_w: 8,
        board_h: 8,
        enemy_count: 9,
        target: 4,
        objective: Objective::CaptureCount,
        turn_limit: 16,
        enemy_actions: 1,
        ai_depth: Some(2),
        ai_difficulty: Some(Difficulty::Normal),
        boss: None,
    },
];

pub fn ai_depth_for_round(round_index: usize) -> u32 {
    match round_index {
        0 => 1,
        1..=2 => 2,
        3..=4 => 3,
        _ => 4,
    }
}

pub fn difficulty_for_depth(depth: u32) -> Difficulty {
    match depth {
        0 | 1 => Difficulty::Easy,
        2 => Difficulty::Normal,
        3 => Difficulty::Hard,
        _ => Difficulty::Expert,
    }
}

/// Every third round (1-indexed) is a boss round
pub fn is_boss_round(round_index: usize) -> bool {
    (round_index + 1) % 3 == 0
}

/// Procedural round for indices past the hand-authored table
pub fn generate_round(round_index: usize) -> RoundConfig {
    let wave = round_index as i64 - BASE_ROUNDS.len() as i64 + 1;
    let depth = ai_depth_for_round(round_index);

    let enemy_count = (9 + wave * 2).max(1) as u32;
    let mut config = RoundConfig {
        board_w: MAX_BOARD,
        board_h: MAX_BOARD,
        enemy_count,
        target: (4 + wave).max(1) as u32,
        objective: if wave % 2 == 0 {
            Objective::Check
        } else {
            Objective::CaptureCount
        },
        turn_limit: (16 + wave.div_euclid(2)).max(12) as u32,
        enemy_actions: 1,
        ai_depth: Some(depth),
        ai_difficulty: Some(difficulty_for_depth(depth)),
        boss: None,
    };

    if is_boss_round(round_index) {
        let boss_index = (round_index + 1) / 3 - 1;
        let boss = Boss::ROSTER[boss_index % Boss::ROSTER.len()];
        config.boss = Some(boss);
        // the swarm has to grow the army before spawning
        if boss == Boss::Swarm {
            config.enemy_count = enemy_count * 2;
        }
    }

    config
}

/// Configuration for any round index
pub fn round_config(round_index: usize) -> RoundConfig {
    BASE_ROUNDS
        .get(round_index)
        .copied()
        .unwrap_or_else(|| generate_round(round_index))
}

/// Score target shown for the round, x1.5 on boss rounds
pub fn score_target_for_round(round_index: usize) -> i64 {
    let base = 100 + round_index as i64 * 75;
    if is_boss_round(round_index) {
        base * 3 / 2
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_schedule() {
        let depths: Vec<u32> = (0..7).map(ai_depth_for_round).collect();
        assert_eq!(depths, vec![1, 2, 2, 3, 3, 4, 4]);
        assert_eq!(difficulty_for_depth(4), Difficulty::Expert);
        assert_eq!(difficulty_for_depth(0), Difficulty::Easy);
    }

    #[test]
    fn test_base_rounds_are_used_first() {
        assert_eq!(round_config(0), BASE_ROUNDS[0]);
        assert_eq!(round_config(1).objective, Objective::Check);
        // round index 2 is hand-authored, so no boss even though it's the third round
        assert_eq!(round_config(2).boss, None);
    }

    #[test]
    fn test_first_generated_round() {
        let config = round_config(3);
        assert_eq!(config.enemy_count, 11);
        assert_eq!(config.target, 5);
        assert_eq!(config.objective, Objective::CaptureCount);
        assert_eq!(config.turn_limit, 16);
        assert_eq!(config.ai_depth, Some(3));
        assert_eq!(config.boss, None);
    }

    #[test]
    fn test_boss_rotation() {
        assert_eq!(generate_round(5).boss, Some(Boss::Mirror));
        assert_eq!(generate_round(8).boss, Some(Boss::Clock));
        assert_eq!(generate_round(11).boss, Some(Boss::Fog));
        assert_eq!(generate_round(17).boss, Some(Boss::Fortress));
        assert_eq!(generate_round(20).boss, Some(Boss::Wall));
    }

    #[test]
    fn test_swarm_doubles_enemies() {
        // round 14: wave 12, 9 + 24 = 33 doubled
        let config = generate_round(14);
        assert_eq!(config.boss, Some(Boss::Swarm));
        assert_eq!(config.enemy_count, 66);
    }

    #[test]
    fn test_score_targets() {
        assert_eq!(score_target_for_round(0), 100);
        assert_eq!(score_target_for_round(1), 175);
        assert_eq!(score_target_for_round(2), 375);
        assert_eq!(score_target_for_round(5), 712);
    }
}

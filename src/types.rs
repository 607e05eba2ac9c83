use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type RoomCode = String;
pub type PlayerId = String;

/// Digits only, so client-side format checks stay trivial
pub const CODE_ALPHABET: &[u8] = b"0123456789";
pub const CODE_LENGTH: usize = 6;

pub const DEFAULT_HOST_NAME: &str = "Host";
pub const DEFAULT_HOST_AVATAR: &str = "🧑";
pub const DEFAULT_PLAYER_NAME: &str = "Anon";
pub const DEFAULT_PLAYER_AVATAR: &str = "🙂";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lobby,
    Submission,
    Voting,
    Results,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Lobby => "lobby",
            Stage::Submission => "submission",
            Stage::Voting => "voting",
            Stage::Results => "results",
        };
        f.write_str(name)
    }
}

/// Per-room game rules, shared by every room in a registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRules {
    pub min_players: usize,
    pub max_answer_chars: usize,
    pub max_name_chars: usize,
}

impl Default for RoomRules {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_answer_chars: 500,
            max_name_chars: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub player_id: PlayerId,
    pub text: String,
}

/// Outcome of one prompt, computed when voting finishes.
///
/// `winner_index` is `None` when the prompt received no submissions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptResult {
    pub winner_index: Option<usize>,
    pub counts: Vec<u64>,
}

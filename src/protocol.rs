//! JSON request and response bodies for the HTTP API.
//!
//! Field names are camelCase on the wire. Request fields are optional so a
//! missing value is reported as a readable `BadRequest` instead of a
//! deserializer rejection.

use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ========== Requests ==========

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartRoundRequest {
    pub code: Option<String>,
    pub prompts: Option<Vec<String>>,
    pub requester_id: Option<PlayerId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitRequest {
    pub code: Option<String>,
    pub player_id: Option<PlayerId>,
    pub prompt_index: Option<usize>,
    pub text: Option<String>,
}

/// Body for host-driven stage changes (`startVoting`, `finish`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageRequest {
    pub code: Option<String>,
    pub requester_id: Option<PlayerId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoteRequest {
    pub code: Option<String>,
    pub voter_id: Option<PlayerId>,
    pub prompt_index: Option<usize>,
    pub submission_index: Option<usize>,
}

// ========== Responses ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub code: RoomCode,
    pub host: Player,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub success: bool,
    pub players: Vec<Player>,
    pub stage: Stage,
    pub player: Player,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResponse {
    pub success: bool,
    pub stage: Stage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishResponse {
    pub success: bool,
    pub stage: Stage,
    pub results: BTreeMap<usize, PromptResult>,
}

/// Full room state as seen by polling clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub code: RoomCode,
    pub stage: Stage,
    pub host_id: PlayerId,
    pub round_no: u32,
    pub version: u64,
    pub created_at: String,
    pub players: Vec<Player>,
    pub prompts: Vec<String>,
    pub submissions: BTreeMap<usize, Vec<Submission>>,
    pub votes: BTreeMap<usize, Vec<u64>>,
    pub results: BTreeMap<usize, PromptResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    pub code: RoomCode,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub rooms: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_accept_missing_fields() {
        let req: VoteRequest = serde_json::from_str(r#"{"code":"123456"}"#).unwrap();
        assert_eq!(req.code.as_deref(), Some("123456"));
        assert!(req.prompt_index.is_none());

        let req: SubmitRequest = serde_json::from_str(
            r#"{"code":"1","playerId":"abc","promptIndex":2,"text":"hi"}"#,
        )
        .unwrap();
        assert_eq!(req.player_id.as_deref(), Some("abc"));
        assert_eq!(req.prompt_index, Some(2));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let mut votes = BTreeMap::new();
        votes.insert(0, vec![0, 2]);
        let mut results = BTreeMap::new();
        results.insert(
            1,
            PromptResult {
                winner_index: None,
                counts: vec![],
            },
        );

        let snapshot = RoomSnapshot {
            code: "042042".to_string(),
            stage: Stage::Results,
            host_id: "h".to_string(),
            round_no: 1,
            version: 7,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            players: vec![],
            prompts: vec!["Q1".to_string(), "Q2".to_string()],
            submissions: BTreeMap::new(),
            votes,
            results,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["stage"], "results");
        assert_eq!(json["hostId"], "h");
        assert_eq!(json["roundNo"], 1);
        assert_eq!(json["votes"]["0"], serde_json::json!([0, 2]));
        assert!(json["results"]["1"]["winnerIndex"].is_null());
    }
}

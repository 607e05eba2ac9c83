//! Per-room state machine: lobby -> submission -> voting -> results.
//!
//! Stage changes only happen in response to an explicit command. Submissions
//! and votes never advance the stage on their own.

use crate::error::{Result, RoomError};
use crate::types::*;
use std::collections::BTreeMap;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Room {
    pub code: RoomCode,
    pub players: Vec<Player>,
    pub host_id: PlayerId,
    pub stage: Stage,
    pub prompts: Vec<String>,
    pub submissions: BTreeMap<usize, Vec<Submission>>,
    pub votes: BTreeMap<usize, Vec<u64>>,
    pub results: BTreeMap<usize, PromptResult>,
    pub round_no: u32,
    pub version: u64,
    pub created_at: String,
    pub last_activity: Instant,
    /// Set by the sweeper when the room leaves the registry. Commands that
    /// were already holding the room's handle see it as gone.
    pub evicted: bool,
}

impl Room {
    /// New room in the lobby with the host as its only player
    pub fn new(code: RoomCode, host: Player) -> Self {
        Self {
            code,
            host_id: host.id.clone(),
            players: vec![host],
            stage: Stage::Lobby,
            prompts: Vec::new(),
            submissions: BTreeMap::new(),
            votes: BTreeMap::new(),
            results: BTreeMap::new(),
            round_no: 0,
            version: 1,
            created_at: chrono::Utc::now().to_rfc3339(),
            last_activity: Instant::now(),
            evicted: false,
        }
    }

    pub fn is_host(&self, player_id: &str) -> bool {
        self.host_id == player_id
    }

    fn touch(&mut self) {
        self.version += 1;
        self.last_activity = Instant::now();
    }

    fn require_stage(&self, expected: Stage, action: &str) -> Result<()> {
        if self.stage != expected {
            return Err(RoomError::bad_request(format!(
                "Cannot {} during {} stage",
                action, self.stage
            )));
        }
        Ok(())
    }

    /// A supplied requester must be the host; an absent one is let through
    fn check_host(&self, requester_id: Option<&str>, action: &str) -> Result<()> {
        match requester_id {
            Some(id) if !self.is_host(id) => Err(RoomError::Forbidden(format!(
                "Only the host may {}",
                action
            ))),
            _ => Ok(()),
        }
    }

    pub fn join(&mut self, player: Player) {
        self.players.push(player);
        self.touch();
    }

    pub fn start_round(
        &mut self,
        prompts: Vec<String>,
        requester_id: Option<&str>,
        rules: &RoomRules,
    ) -> Result<()> {
        self.check_host(requester_id, "start the round")?;

        if !matches!(self.stage, Stage::Lobby | Stage::Results) {
            return Err(RoomError::bad_request(format!(
                "Cannot start a round during {} stage",
                self.stage
            )));
        }

        if self.players.len() < rules.min_players {
            return Err(RoomError::bad_request(format!(
                "Not enough players to start (min {})",
                rules.min_players
            )));
        }

        // Stored verbatim; whitespace only decides whether a prompt is blank
        if prompts.is_empty() {
            return Err(RoomError::bad_request("At least one prompt is required"));
        }
        if prompts.iter().any(|p| p.trim().is_empty()) {
            return Err(RoomError::bad_request("Prompts must not be empty"));
        }

        self.prompts = prompts;
        self.submissions.clear();
        self.votes.clear();
        self.results.clear();
        self.stage = Stage::Submission;
        self.round_no += 1;
        self.touch();
        Ok(())
    }

    fn check_prompt_index(&self, prompt_index: usize) -> Result<()> {
        if prompt_index >= self.prompts.len() {
            return Err(RoomError::bad_request(format!(
                "Prompt index {} out of range ({} prompts)",
                prompt_index,
                self.prompts.len()
            )));
        }
        Ok(())
    }

    /// Record an answer. Repeated answers from one player are kept in call order.
    /// The player id is recorded as given and is not checked against the roster.
    pub fn submit(
        &mut self,
        player_id: &str,
        prompt_index: usize,
        text: &str,
        rules: &RoomRules,
    ) -> Result<()> {
        self.require_stage(Stage::Submission, "submit answers")?;
        self.check_prompt_index(prompt_index)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(RoomError::bad_request("Answer must not be empty"));
        }
        if text.chars().count() > rules.max_answer_chars {
            return Err(RoomError::bad_request(format!(
                "Answer too long (max {} characters)",
                rules.max_answer_chars
            )));
        }

        self.submissions
            .entry(prompt_index)
            .or_default()
            .push(Submission {
                player_id: player_id.to_string(),
                text: text.to_string(),
            });
        self.touch();
        Ok(())
    }

    pub fn start_voting(&mut self, requester_id: Option<&str>) -> Result<()> {
        self.check_host(requester_id, "start voting")?;
        self.require_stage(Stage::Submission, "start voting")?;

        self.votes = super::tally::empty_tallies(self.prompts.len(), &self.submissions);
        self.stage = Stage::Voting;
        self.touch();
        Ok(())
    }

    /// Count one vote and return the new tally for that submission
    pub fn vote(&mut self, prompt_index: usize, submission_index: usize) -> Result<u64> {
        self.require_stage(Stage::Voting, "vote")?;
        self.check_prompt_index(prompt_index)?;

        let count = super::tally::increment(&mut self.votes, prompt_index, submission_index)?;
        self.touch();
        Ok(count)
    }

    pub fn finish(&mut self, requester_id: Option<&str>) -> Result<()> {
        self.check_host(requester_id, "finish voting")?;
        self.require_stage(Stage::Voting, "finish voting")?;

        self.results = super::tally::compute_results(&self.votes);
        self.stage = Stage::Results;
        self.touch();
        Ok(())
    }
}

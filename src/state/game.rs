use super::AppState;
use crate::error::Result;
use crate::protocol::{RoomSnapshot, RosterResponse};
use crate::types::*;
use std::collections::BTreeMap;

impl AppState {
    /// Add a player to a room, in any stage
    pub async fn join_room(
        &self,
        code: &str,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Result<(Player, Vec<Player>, Stage)> {
        let mut room = self.write_room(code).await?;
        let player = self.new_player(name, avatar, DEFAULT_PLAYER_NAME, DEFAULT_PLAYER_AVATAR);

        room.join(player.clone());
        tracing::info!(
            code,
            player = %player.name,
            players = room.players.len(),
            "Player joined"
        );
        Ok((player, room.players.clone(), room.stage))
    }

    /// Host starts a new round with the given prompts
    pub async fn start_round(
        &self,
        code: &str,
        prompts: Vec<String>,
        requester_id: Option<&str>,
    ) -> Result<Stage> {
        let mut room = self.write_room(code).await?;
        room.start_round(prompts, requester_id, &self.rules)?;
        tracing::info!(
            code,
            round = room.round_no,
            prompts = room.prompts.len(),
            "Round started"
        );
        Ok(room.stage)
    }

    pub async fn submit_answer(
        &self,
        code: &str,
        player_id: &str,
        prompt_index: usize,
        text: &str,
    ) -> Result<()> {
        self.write_room(code)
            .await?
            .submit(player_id, prompt_index, text, &self.rules)?;
        tracing::debug!(code, player_id, prompt_index, "Answer submitted");
        Ok(())
    }

    pub async fn start_voting(&self, code: &str, requester_id: Option<&str>) -> Result<Stage> {
        let mut room = self.write_room(code).await?;
        room.start_voting(requester_id)?;
        tracing::info!(code, "Voting started");
        Ok(room.stage)
    }

    /// Count one vote. Voters are not tracked, so repeat votes all count.
    pub async fn cast_vote(
        &self,
        code: &str,
        voter_id: Option<&str>,
        prompt_index: usize,
        submission_index: usize,
    ) -> Result<()> {
        let count = self.write_room(code).await?.vote(prompt_index, submission_index)?;
        tracing::debug!(
            code,
            voter_id,
            prompt_index,
            submission_index,
            count,
            "Vote counted"
        );
        Ok(())
    }

    /// Close voting and compute the winner of every prompt
    pub async fn finish_round(
        &self,
        code: &str,
        requester_id: Option<&str>,
    ) -> Result<BTreeMap<usize, PromptResult>> {
        let mut room = self.write_room(code).await?;
        room.finish(requester_id)?;
        tracing::info!(code, round = room.round_no, "Results revealed");
        Ok(room.results.clone())
    }

    pub async fn get_state(&self, code: &str) -> Result<RoomSnapshot> {
        let room = self.read_room(code).await?;
        Ok(RoomSnapshot {
            code: room.code.clone(),
            stage: room.stage,
            host_id: room.host_id.clone(),
            round_no: room.round_no,
            version: room.version,
            created_at: room.created_at.clone(),
            players: room.players.clone(),
            prompts: room.prompts.clone(),
            submissions: room.submissions.clone(),
            votes: room.votes.clone(),
            results: room.results.clone(),
        })
    }

    pub async fn get_roster(&self, code: &str) -> Result<RosterResponse> {
        let room = self.read_room(code).await?;
        Ok(RosterResponse {
            code: room.code.clone(),
            players: room.players.clone(),
        })
    }
}

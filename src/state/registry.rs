use super::{AppState, Room};
use crate::error::{Result, RoomError};
use crate::types::*;
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Draws before we start warning about collisions
pub const BOUNDED_CODE_ATTEMPTS: u32 = 10;

/// Generate a random room code (6 digits)
fn generate_room_code() -> RoomCode {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Number of distinct codes the alphabet can express
fn code_space() -> usize {
    CODE_ALPHABET.len().pow(CODE_LENGTH as u32)
}

/// Canonicalize a client-supplied code: trimmed, then checked against the
/// code alphabet and length.
pub fn normalize_code(raw: Option<&str>) -> Result<RoomCode> {
    let code = raw.map(|c| c.trim().to_string()).unwrap_or_default();
    if code.is_empty() {
        return Err(RoomError::bad_request("Missing code"));
    }
    if code.len() != CODE_LENGTH || !code.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return Err(RoomError::bad_request("Invalid room code"));
    }
    Ok(code)
}

/// Draw codes until one is free. The first `BOUNDED_CODE_ATTEMPTS` draws are
/// the expected path; after that we keep going, unless `max_attempts` caps it.
fn allocate_code(
    is_taken: impl Fn(&str) -> bool,
    active_rooms: usize,
    max_attempts: Option<u32>,
    mut draw: impl FnMut() -> RoomCode,
) -> Result<RoomCode> {
    // Every code is live, so no amount of drawing can succeed
    if active_rooms >= code_space() {
        return Err(RoomError::RegistryExhausted);
    }

    let mut attempts = 0u32;
    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            tracing::error!(attempts, "Giving up on room code allocation");
            return Err(RoomError::RegistryExhausted);
        }

        let code = draw();
        attempts += 1;
        if !is_taken(&code) {
            return Ok(code);
        }

        if attempts == BOUNDED_CODE_ATTEMPTS {
            tracing::warn!(
                active_rooms,
                "{} room code collisions in a row, retrying until a free code is found",
                attempts
            );
        }
    }
}

impl AppState {
    pub(super) fn new_player(
        &self,
        name: Option<String>,
        avatar: Option<String>,
        default_name: &str,
        default_avatar: &str,
    ) -> Player {
        let name = name
            .map(|n| n.trim().chars().take(self.rules.max_name_chars).collect::<String>())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_name.to_string());
        let avatar = avatar
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| default_avatar.to_string());

        Player {
            id: ulid::Ulid::new().to_string(),
            name,
            avatar,
        }
    }

    /// Create a room in the lobby with the caller as host
    pub async fn create_room(
        &self,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Result<(RoomCode, Player)> {
        let host = self.new_player(name, avatar, DEFAULT_HOST_NAME, DEFAULT_HOST_AVATAR);

        let mut rooms = self.rooms.write().await;
        let code = allocate_code(
            |c| rooms.contains_key(c),
            rooms.len(),
            self.max_code_attempts,
            generate_room_code,
        )?;

        let room = Room::new(code.clone(), host.clone());
        rooms.insert(code.clone(), Arc::new(RwLock::new(room)));

        tracing::info!(code = %code, host = %host.name, rooms = rooms.len(), "Room created");
        Ok((code, host))
    }

    /// Remove rooms with no mutation for longer than `max_idle`.
    /// Returns the number of rooms removed.
    pub async fn sweep_idle_rooms(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut rooms = self.rooms.write().await;

        // A locked room is in use right now, so it is not idle. Marking the
        // room under its own write lock means any command still holding its
        // handle finds it evicted once it gets the lock.
        let mut stale = Vec::new();
        for (code, room) in rooms.iter() {
            if let Ok(mut room) = room.try_write() {
                if now.duration_since(room.last_activity) >= max_idle {
                    room.evicted = true;
                    stale.push(code.clone());
                }
            }
        }

        for code in &stale {
            rooms.remove(code);
            tracing::info!(code = %code, "Evicted idle room");
        }
        stale.len()
    }
}

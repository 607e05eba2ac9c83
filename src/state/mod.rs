mod game;
mod registry;
mod room;
mod tally;

pub use registry::{normalize_code, BOUNDED_CODE_ATTEMPTS};
pub use room::Room;

use crate::error::{Result, RoomError};
use crate::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Shared application state.
///
/// The registry lock is only held long enough to find or insert a room.
/// Every command then works under that room's own lock, so rooms never
/// contend with each other.
#[derive(Clone)]
pub struct AppState {
    rooms: Arc<RwLock<HashMap<RoomCode, Arc<RwLock<Room>>>>>,
    pub rules: Arc<RoomRules>,
    /// Hard cap on code draws per creation (None = keep drawing)
    pub max_code_attempts: Option<u32>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_rules(RoomRules::default(), None)
    }

    pub fn with_rules(rules: RoomRules, max_code_attempts: Option<u32>) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            rules: Arc::new(rules),
            max_code_attempts,
        }
    }

    /// Look up a room by its canonical code
    pub async fn room(&self, code: &str) -> Result<Arc<RwLock<Room>>> {
        self.rooms
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or(RoomError::NotFound)
    }

    /// Lock a room for a command. A room swept out of the registry while
    /// the caller waited on its lock is reported as not found, so no update
    /// lands on a room nobody can reach anymore.
    pub async fn write_room(&self, code: &str) -> Result<OwnedRwLockWriteGuard<Room>> {
        lock_live(self.room(code).await?).await
    }

    pub async fn read_room(&self, code: &str) -> Result<OwnedRwLockReadGuard<Room>> {
        let room = self.room(code).await?.read_owned().await;
        if room.evicted {
            return Err(RoomError::NotFound);
        }
        Ok(room)
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

/// Write-lock a room handle, refusing rooms the sweeper has already evicted
async fn lock_live(room: Arc<RwLock<Room>>) -> Result<OwnedRwLockWriteGuard<Room>> {
    let room = room.write_owned().await;
    if room.evicted {
        return Err(RoomError::NotFound);
    }
    Ok(room)
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

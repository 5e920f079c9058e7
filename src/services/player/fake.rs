//! In-memory player used by behavioral tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use async_trait::async_trait;

use super::{MediaPlayerHandle, PlayerError, PlayerId, Volume};

#[derive(Debug, Default)]
struct FakeState {
    playing: bool,
    position: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    playlist: Vec<String>,
    item_index: usize,
    fail_commands: bool,
    autoplay_blocks: u32,
    volume_writes: Vec<f64>,
}

/// Scriptable [`MediaPlayerHandle`] backed by plain in-memory state.
///
/// Records every volume write so tests can assert fade monotonicity, and can
/// be switched into a failing mode to exercise the degrade paths.
#[derive(Debug)]
pub(crate) struct FakePlayer {
    id: PlayerId,
    state: Mutex<FakeState>,
}

impl FakePlayer {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: PlayerId::new(id),
            state: Mutex::new(FakeState {
                duration: 600.0,
                ..FakeState::default()
            }),
        }
    }

    pub(crate) fn with_volume(id: &str, volume: f64) -> Self {
        let player = Self::new(id);
        player.state.lock().unwrap().volume = volume;
        player
    }

    pub(crate) fn set_position(&self, seconds: f64) {
        self.state.lock().unwrap().position = seconds;
    }

    pub(crate) fn set_duration(&self, seconds: f64) {
        self.state.lock().unwrap().duration = seconds;
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().fail_commands = failing;
    }

    pub(crate) fn block_autoplay(&self, times: u32) {
        self.state.lock().unwrap().autoplay_blocks = times;
    }

    pub(crate) fn set_playlist(&self, items: Vec<String>) {
        self.state.lock().unwrap().playlist = items;
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub(crate) fn position(&self) -> f64 {
        self.state.lock().unwrap().position
    }

    pub(crate) fn current_volume(&self) -> f64 {
        self.state.lock().unwrap().volume
    }

    pub(crate) fn muted(&self) -> bool {
        self.state.lock().unwrap().muted
    }

    pub(crate) fn volume_writes(&self) -> Vec<f64> {
        self.state.lock().unwrap().volume_writes.clone()
    }

    pub(crate) fn play_attempts_blocked(&self) -> u32 {
        self.state.lock().unwrap().autoplay_blocks
    }

    fn check_failing(&self) -> Result<(), PlayerError> {
        if self.state.lock().unwrap().fail_commands {
            Err(PlayerError::CommandFailed("player is reloading".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MediaPlayerHandle for FakePlayer {
    async fn play(&self) -> Result<(), PlayerError> {
        self.check_failing()?;
        let mut state = self.state.lock().unwrap();
        if state.autoplay_blocks > 0 {
            state.autoplay_blocks -= 1;
            return Err(PlayerError::AutoplayBlocked(self.id.clone()));
        }
        state.playing = true;
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlayerError> {
        self.check_failing()?;
        self.state.lock().unwrap().playing = false;
        Ok(())
    }

    async fn seek_to(&self, seconds: f64) -> Result<(), PlayerError> {
        self.check_failing()?;
        self.state.lock().unwrap().position = seconds;
        Ok(())
    }

    async fn current_time(&self) -> Result<f64, PlayerError> {
        self.check_failing()?;
        Ok(self.state.lock().unwrap().position)
    }

    async fn duration(&self) -> Result<f64, PlayerError> {
        self.check_failing()?;
        Ok(self.state.lock().unwrap().duration)
    }

    async fn set_volume(&self, volume: Volume) -> Result<(), PlayerError> {
        self.check_failing()?;
        let mut state = self.state.lock().unwrap();
        state.volume = volume.rounded();
        state.volume_writes.push(volume.rounded());
        Ok(())
    }

    async fn volume(&self) -> Result<f64, PlayerError> {
        self.check_failing()?;
        Ok(self.state.lock().unwrap().volume)
    }

    async fn mute(&self) -> Result<(), PlayerError> {
        self.check_failing()?;
        self.state.lock().unwrap().muted = true;
        Ok(())
    }

    async fn unmute(&self) -> Result<(), PlayerError> {
        self.check_failing()?;
        self.state.lock().unwrap().muted = false;
        Ok(())
    }

    async fn is_muted(&self) -> Result<bool, PlayerError> {
        self.check_failing()?;
        Ok(self.state.lock().unwrap().muted)
    }

    async fn next_item(&self) -> Result<(), PlayerError> {
        self.check_failing()?;
        let mut state = self.state.lock().unwrap();
        if !state.playlist.is_empty() {
            state.item_index = (state.item_index + 1) % state.playlist.len();
        }
        Ok(())
    }

    async fn play_item_at(&self, index: usize) -> Result<(), PlayerError> {
        self.check_failing()?;
        let mut state = self.state.lock().unwrap();
        if index >= state.playlist.len() {
            return Err(PlayerError::CommandFailed(format!(
                "playlist index {index} out of range"
            )));
        }
        state.item_index = index;
        state.playing = true;
        Ok(())
    }

    async fn playlist(&self) -> Result<Vec<String>, PlayerError> {
        self.check_failing()?;
        Ok(self.state.lock().unwrap().playlist.clone())
    }
}

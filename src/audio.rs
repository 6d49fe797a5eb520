//! Sound effects driven by simulation events
//!
//! Audio is fire-and-forget: sinks receive effects after the tick that
//! produced them and nothing they do feeds back into the game. A missing
//! sound only mutes that effect.

use std::collections::HashSet;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Background loop, started once at launch
    Music,
    /// Bird cleared a pipe
    Score,
    /// Bird hit a pipe or the ground
    Die,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [SoundEffect::Music, SoundEffect::Score, SoundEffect::Die];

    /// Asset the host loads for this effect
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Music => "main.wav",
            SoundEffect::Score => "score.wav",
            SoundEffect::Die => "die.wav",
        }
    }

    /// Effect to play for a game event, if any
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Scored => Some(SoundEffect::Score),
            GameEvent::Died => Some(SoundEffect::Die),
            GameEvent::Started | GameEvent::Flapped | GameEvent::SpeedUp => None,
        }
    }
}

/// Host-side sound player
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio manager that logs what it would play
///
/// Tracks which effects were loaded; unloaded effects are skipped silently,
/// the same way a missing clip is.
#[derive(Debug, Clone)]
pub struct AudioManager {
    loaded: HashSet<SoundEffect>,
    muted: bool,
    /// Effects played, oldest first
    pub played: Vec<SoundEffect>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(SoundEffect::ALL)
    }
}

impl AudioManager {
    pub fn new(loaded: impl IntoIterator<Item = SoundEffect>) -> Self {
        let loaded: HashSet<_> = loaded.into_iter().collect();
        for effect in SoundEffect::ALL {
            if !loaded.contains(&effect) {
                log::warn!("{} not loaded - {:?} disabled", effect.file_name(), effect);
            }
        }
        Self {
            loaded,
            muted: false,
            played: Vec::new(),
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_loaded(&self, effect: SoundEffect) -> bool {
        self.loaded.contains(&effect)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted || !self.is_loaded(effect) {
            return;
        }
        log::info!("♪ {}", effect.file_name());
        self.played.push(effect);
    }
}

/// Play the effect for each event, in order
pub fn play_events(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for effect in events.iter().copied().filter_map(SoundEffect::for_event) {
        sink.play(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = AudioManager::default();
        play_events(
            &mut audio,
            &[
                GameEvent::Started,
                GameEvent::Flapped,
                GameEvent::Scored,
                GameEvent::Scored,
                GameEvent::Died,
            ],
        );
        assert_eq!(
            audio.played,
            vec![SoundEffect::Score, SoundEffect::Score, SoundEffect::Die]
        );
    }

    #[test]
    fn test_missing_sound_is_skipped() {
        let mut audio = AudioManager::new([SoundEffect::Music, SoundEffect::Score]);
        assert!(!audio.is_loaded(SoundEffect::Die));
        play_events(&mut audio, &[GameEvent::Died, GameEvent::Scored]);
        assert_eq!(audio.played, vec![SoundEffect::Score]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::default();
        audio.set_muted(true);
        audio.play(SoundEffect::Music);
        play_events(&mut audio, &[GameEvent::Scored]);
        assert!(audio.played.is_empty());
    }
}

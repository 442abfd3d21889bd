//=========================================================================
// Sound Manager
//=========================================================================
//
// Volume and cue bookkeeping driven by Sound events. Playback itself
// belongs to an audio backend; this tracks what it should be doing.
//
//   OnVolumeUp / OnVolumeDown  → ±0.1, clamped to [0, 1]
//   OnMute / OnUnMute          → mute flag (volume kept)
//   OnPlay / OnStop [Text(cue)] → active cue set
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeSet;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventData, HandlerError};

const VOLUME_STEP: f32 = 0.1;

//=== SoundManager ========================================================

#[derive(Debug)]
pub struct SoundManager {
    volume: f32,
    muted: bool,
    playing: BTreeSet<String>,
}

impl SoundManager {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            muted: false,
            playing: BTreeSet::new(),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Volume actually applied (0 while muted).
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self, cue: &str) -> bool {
        self.playing.contains(cue)
    }

    pub fn handle_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        match event.action() {
            EventAction::OnVolumeUp => self.change_volume(VOLUME_STEP),
            EventAction::OnVolumeDown => self.change_volume(-VOLUME_STEP),
            EventAction::OnMute => self.muted = true,
            EventAction::OnUnMute => self.muted = false,
            EventAction::OnPlay => {
                self.playing.insert(event.text_param(0)?.to_string());
            }
            EventAction::OnStop => {
                self.playing.remove(event.text_param(0)?);
            }
            _ => return Ok(()),
        }

        debug!(
            target: "game::sound",
            "Volume {:.1}{}, {} cue(s) playing",
            self.volume,
            if self.muted { " (muted)" } else { "" },
            self.playing.len()
        );
        Ok(())
    }

    fn change_volume(&mut self, delta: f32) {
        // Round to a tenth so repeated steps land exactly on 0 and 1
        self.volume = ((self.volume + delta).clamp(0.0, 1.0) * 10.0).round() / 10.0;
    }
}

impl Default for SoundManager {
    fn default() -> Self {
        Self::new(0.5)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventCategory;

    fn sound(action: EventAction) -> EventData {
        EventData::new(EventCategory::Sound, action)
    }

    #[test]
    fn volume_steps_and_clamps() {
        let mut manager = SoundManager::new(0.9);
        manager.handle_event(&sound(EventAction::OnVolumeUp)).unwrap();
        manager.handle_event(&sound(EventAction::OnVolumeUp)).unwrap();
        assert_eq!(manager.volume(), 1.0);

        for _ in 0..15 {
            manager.handle_event(&sound(EventAction::OnVolumeDown)).unwrap();
        }
        assert_eq!(manager.volume(), 0.0);
    }

    #[test]
    fn mute_keeps_volume() {
        let mut manager = SoundManager::default();
        manager.handle_event(&sound(EventAction::OnMute)).unwrap();
        assert!(manager.is_muted());
        assert_eq!(manager.effective_volume(), 0.0);

        manager.handle_event(&sound(EventAction::OnUnMute)).unwrap();
        assert_eq!(manager.effective_volume(), 0.5);
    }

    #[test]
    fn cues_start_and_stop() {
        let mut manager = SoundManager::default();
        manager
            .handle_event(&sound(EventAction::OnPlay).with_parameter("game music"))
            .unwrap();
        assert!(manager.is_playing("game music"));

        manager
            .handle_event(&sound(EventAction::OnStop).with_parameter("game music"))
            .unwrap();
        assert!(!manager.is_playing("game music"));
    }

    #[test]
    fn play_without_cue_fails() {
        let mut manager = SoundManager::default();
        assert!(manager.handle_event(&sound(EventAction::OnPlay)).is_err());
    }
}

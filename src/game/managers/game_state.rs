//=========================================================================
// Game State Manager
//=========================================================================
//
// Reacts to end-of-run player events by bringing the menu back.
//
//   Player/OnLose ─► MainMenu/OnPause (next tick)
//   Player/OnWin  ─► MainMenu/OnPause (next tick)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData, EventQueue, HandlerError};

//=== GameStateManager ====================================================

#[derive(Debug, Default)]
pub struct GameStateManager {
    losses: u32,
    wins: u32,
}

impl GameStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn handle_player_event(
        &mut self,
        event: &EventData,
        events: &mut EventQueue,
    ) -> Result<(), HandlerError> {
        match event.action() {
            EventAction::OnLose => {
                self.losses += 1;
                info!(target: "game", "Run lost ({} so far)", self.losses);
            }
            EventAction::OnWin => {
                self.wins += 1;
                info!(target: "game", "Run won ({} so far)", self.wins);
            }
            _ => return Ok(()),
        }

        events.publish(EventData::new(EventCategory::MainMenu, EventAction::OnPause));
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lose_brings_back_menu() {
        let mut state = GameStateManager::new();
        let mut events = EventQueue::new();

        state
            .handle_player_event(&EventData::new(EventCategory::Player, EventAction::OnLose), &mut events)
            .unwrap();

        assert_eq!(state.losses(), 1);
        assert!(events.contains(&EventData::new(EventCategory::MainMenu, EventAction::OnPause)));
    }

    #[test]
    fn other_player_events_are_ignored() {
        let mut state = GameStateManager::new();
        let mut events = EventQueue::new();

        state
            .handle_player_event(
                &EventData::new(EventCategory::Player, EventAction::OnPickup),
                &mut events,
            )
            .unwrap();

        assert!(events.is_empty());
        assert_eq!(state.losses() + state.wins(), 0);
    }
}

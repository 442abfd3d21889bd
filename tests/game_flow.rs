//=========================================================================
// Game Flow Tests
//=========================================================================
//
// End-to-end behaviour through the public API: dispatcher semantics on a
// plain context, then whole-game flows driven tick by tick.
//
//=========================================================================

use std::time::Duration;

use horizon_infinity::core::events::{
    EventAction, EventCategory, EventData, EventDispatcher, HandlerError,
};
use horizon_infinity::core::input::{InputEvent, KeyCode};
use horizon_infinity::game::managers::menu::{LOSE_MENU, MAIN_MENU};
use horizon_infinity::game::{Game, GameSettings};
use horizon_infinity::EngineBuilder;

const DT: Duration = Duration::from_millis(16);

fn menu(action: EventAction) -> EventData {
    EventData::new(EventCategory::MainMenu, action)
}

fn playing_game(seed: u64) -> Game {
    let mut game = Game::new(GameSettings::default(), seed);
    game.publish(menu(EventAction::OnStart));
    game.tick(DT, &[]);
    assert!(game.is_playing());
    game
}

//=========================================================================
// Dispatcher
//=========================================================================

#[test]
fn duplicate_events_are_delivered_once() {
    let mut dispatcher: EventDispatcher<Vec<EventAction>> = EventDispatcher::new();
    dispatcher.subscribe(EventCategory::Sound, |log, event, _| {
        log.push(event.action());
        Ok(())
    });

    assert!(dispatcher.publish(EventData::new(EventCategory::Sound, EventAction::OnMute)));
    assert!(!dispatcher.publish(EventData::new(EventCategory::Sound, EventAction::OnMute)));
    assert!(dispatcher.publish(EventData::new(EventCategory::Sound, EventAction::OnUnMute)));

    let mut log = Vec::new();
    let report = dispatcher.tick(&mut log);

    assert_eq!(log, vec![EventAction::OnMute, EventAction::OnUnMute]);
    assert_eq!(report.processed, 2);
}

#[test]
fn follow_up_events_wait_for_the_next_tick() {
    let mut dispatcher: EventDispatcher<Vec<EventAction>> = EventDispatcher::new();
    dispatcher.subscribe(EventCategory::Player, |log, event, queue| {
        log.push(event.action());
        if event.action() == EventAction::OnLose {
            queue.publish(EventData::new(EventCategory::Player, EventAction::OnWin));
        }
        Ok(())
    });

    dispatcher.publish(EventData::new(EventCategory::Player, EventAction::OnLose));
    let mut log = Vec::new();

    dispatcher.tick(&mut log);
    assert_eq!(log, vec![EventAction::OnLose]);
    assert_eq!(dispatcher.queue().len(), 1);

    dispatcher.tick(&mut log);
    assert_eq!(log, vec![EventAction::OnLose, EventAction::OnWin]);
    assert!(dispatcher.queue().is_empty());
}

#[test]
fn failing_handler_does_not_stop_the_others() {
    let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
    dispatcher.subscribe(EventCategory::Debug, |_, _, _| {
        Err(HandlerError::UnknownTarget("nothing".to_string()))
    });
    dispatcher.subscribe(EventCategory::Debug, |count, _, _| {
        *count += 1;
        Ok(())
    });

    dispatcher.publish(EventData::new(EventCategory::Debug, EventAction::OnToggleDebug));
    let mut count = 0;
    let report = dispatcher.tick(&mut count);

    assert_eq!(count, 1);
    assert_eq!(report.deliveries, 2);
    assert_eq!(report.failures, 1);
}

//=========================================================================
// Game
//=========================================================================

#[test]
fn pause_key_round_trip() {
    let mut game = playing_game(1);

    game.tick(DT, &[vec![InputEvent::key_down(KeyCode::Escape)]]);
    game.tick(DT, &[vec![InputEvent::key_up(KeyCode::Escape)]]);
    assert!(!game.is_playing());
    assert!(game.world().menu.is_visible());

    game.tick(DT, &[vec![InputEvent::key_down(KeyCode::Escape)]]);
    game.tick(DT, &[]);
    assert!(game.is_playing());
}

#[test]
fn switch_zone_activates_third_person_camera_once() {
    let mut game = playing_game(2);
    let third_person = game.world().settings.third_person_camera_id.clone();

    game.tick(DT, &[]);
    let active = game.world().cameras.active_camera().map(|c| c.id.clone());
    assert_eq!(active.as_deref(), Some(third_person.as_str()));

    let camera_events = game
        .pending_events()
        .iter()
        .filter(|e| e.category() == EventCategory::Camera)
        .count();
    assert_eq!(camera_events, 0, "zone fires once per entry");
}

#[test]
fn losing_shows_the_lose_menu_and_restart_plays_again() {
    let mut game = playing_game(3);

    let id = game.world_mut().spawn();
    let position = game.world().player.position();
    if let Some(actor) = game.world_mut().objects.find_mut(id) {
        actor.transform.translation = position;
    }

    // Collision: loss recorded, OnLose queued.
    game.tick(DT, &[]);
    assert_eq!(game.scores().losses, 1);
    assert_eq!(game.world().menu.active_scene(), Some(LOSE_MENU));

    // OnLose: game state queues OnPause.
    game.tick(DT, &[]);
    assert_eq!(game.world().game_state.losses(), 1);

    // OnPause: menu back on screen, still showing the lose scene.
    game.tick(DT, &[]);
    assert!(!game.is_playing());
    assert!(game.world().menu.is_visible());
    assert_eq!(game.world().menu.active_scene(), Some(LOSE_MENU));

    game.publish(menu(EventAction::OnStart));
    game.tick(DT, &[]);
    assert!(game.is_playing());
    assert_eq!(game.world().menu.active_scene(), Some(MAIN_MENU));
    assert_eq!(game.world().player.position(), game.world().settings.player_start);
}

#[test]
fn exit_event_ends_the_session() {
    let mut game = Game::new(GameSettings::default(), 4);
    game.publish(menu(EventAction::OnExit));
    game.tick(DT, &[]);
    assert!(game.exit_requested());
}

//=========================================================================
// Engine
//=========================================================================

#[test]
fn headless_sessions_repeat_per_seed() {
    let first = EngineBuilder::new().with_seed(99).build().simulate(1_500);
    let second = EngineBuilder::new().with_seed(99).build().simulate(1_500);

    assert_eq!(first, second);
    assert_eq!(first.ticks, 1_500);
    assert!(first.high_score > 0);
}

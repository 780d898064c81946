use pale_harbor::{
    clock::MeditationRefusal,
    config::GameConfig,
    data::interactables::INTERIOR_ENTRY,
    game::{inventory::Acquisition, EndReason, Game},
    input::InputFrame,
    map::Zone,
    ports::{HeadlessPresenter, TracingAudio},
    world::interactables::{Effect, InteractionView, Interactables, OutcomeStatus},
    GamePhase,
};

fn game(start_hour: f64, sanity: f32) -> Game<HeadlessPresenter, TracingAudio> {
    Game::headless(GameConfig {
        start_hour,
        start_sanity: sanity,
        play_intro: false,
        ..GameConfig::default()
    })
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.05
}

#[test]
fn locked_door_turns_the_player_away() {
    let mut g = game(12.0, 80.0);
    let attempt = g.interact().expect("door in reach of spawn");
    assert_eq!(attempt.object, "Lighthouse Door");
    assert_eq!(attempt.status, OutcomeStatus::Rejected);
    assert!(!g.world().inside_lighthouse());
    assert_eq!(g.sanity(), 80.0);
    assert_eq!(g.phase(), GamePhase::Dialogue);
}

#[test]
fn key_opens_the_lighthouse_at_a_cost() {
    let mut g = game(12.0, 60.0);
    g.add_to_inventory("Lighthouse Key");
    let before = g.sanity();

    let entry = g.interact().expect("door in reach of spawn");
    assert_eq!(entry.status, OutcomeStatus::Performed);
    assert!(g.world().inside_lighthouse());
    assert_eq!(g.player().position, INTERIOR_ENTRY);
    assert_eq!(g.player().current_zone(), Some(Zone::LighthouseInterior));
    assert!(close(g.sanity(), before - 8.0));

    g.dismiss_dialogue();
    let after_entry = g.sanity();
    g.update(0.2, &InputFrame::idle()).unwrap();
    assert!(close(g.sanity(), after_entry - 5.0), "interior narration costs sanity");
    assert_eq!(g.phase(), GamePhase::Dialogue);
    assert_eq!(g.location(), "Lighthouse Interior");
}

#[test]
fn meditation_by_day_restores_and_passes_time() {
    let mut g = game(12.0, 50.0);
    let gain = g.attempt_meditation().expect("safe daylight meditation");
    assert!((12.0..=19.0).contains(&gain));
    assert_eq!(g.sanity(), 50.0 + gain);
    assert!((g.clock().hours() - 12.25).abs() < 1e-9);
}

#[test]
fn meditation_at_night_is_refused() {
    let mut g = game(2.0, 50.0);
    assert_eq!(g.attempt_meditation(), Err(MeditationRefusal::TooDark));
    assert_eq!(g.sanity(), 50.0);
    assert!((g.clock().hours() - 2.0).abs() < 1e-9);
}

#[test]
fn night_drain_ends_the_game_exactly_once() {
    let mut g = game(23.0, 1.0);
    g.update(10.0, &InputFrame::idle()).unwrap();
    assert_eq!(g.sanity(), 0.0);
    assert!(matches!(g.phase(), GamePhase::GameOver(_)));
    assert_eq!(g.presenter().end_screens.len(), 1);

    g.update(10.0, &InputFrame::idle()).unwrap();
    g.trigger_game_over(EndReason::Sanity);
    assert_eq!(g.presenter().end_screens.len(), 1);
}

#[test]
fn oversized_loss_clamps_to_zero_and_ends_play() {
    let mut g = game(12.0, 70.0);
    g.decrease_sanity(150.0);
    assert_eq!(g.sanity(), 0.0);
    g.update(0.016, &InputFrame::idle()).unwrap();
    assert_eq!(g.phase(), GamePhase::GameOver(EndReason::Sanity));
    let screen = g.end_screen().expect("end screen shown");
    assert_eq!(screen.title, "MADNESS CONSUMED YOU");
    assert!(screen.survival.is_some());
}

#[test]
fn important_items_reward_only_their_first_pickup() {
    let mut g = game(12.0, 40.0);
    assert_eq!(g.add_to_inventory("Old Journal"), Acquisition::Duplicate);
    assert_eq!(g.sanity(), 40.0);

    g.add_to_inventory("Ship's Log");
    assert_eq!(g.sanity(), 45.0);
    assert_eq!(g.add_to_inventory("Ship's Log"), Acquisition::Duplicate);
    assert_eq!(g.sanity(), 45.0);
    assert_eq!(
        g.presenter().inventory,
        vec!["Old Journal".to_string(), "Ship's Log".to_string()]
    );
}

#[test]
fn soggy_journal_pays_out_once() {
    let mut objects = Interactables::pale_harbor();
    let idx = objects.find("Soggy Journal").expect("journal on the dock");
    let inventory = pale_harbor::game::inventory::Inventory::with_items(["Old Journal"]);
    let view = InteractionView {
        sanity: 70.0,
        hours: 12.0,
        actor: objects.get(idx).map(|o| o.center()).unwrap_or_default(),
        inside_lighthouse: false,
        inventory: &inventory,
    };

    let journal = objects.get_mut(idx).unwrap();
    let first = journal.interact(&view);
    assert_eq!(first.status, OutcomeStatus::Performed);
    assert!(first.effects.contains(&Effect::Grant("Keeper's Journal")));
    assert!(first.effects.contains(&Effect::Sanity(-12.0)));

    let second = journal.interact(&view);
    assert_eq!(second.status, OutcomeStatus::AlreadyDone);
    assert!(second.effects.is_empty());
    assert_eq!(second.lines, &["You've already taken the journal."]);
}

#[test]
fn bad_frame_delta_is_refused() {
    let mut g = game(12.0, 80.0);
    let before = g.snapshot();
    assert!(g.update(f64::INFINITY, &InputFrame::idle()).is_err());
    assert_eq!(g.snapshot(), before);
}

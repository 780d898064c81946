//! The session: one owned state object advanced by `update` once per frame.

pub mod deferred;
pub mod inventory;

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    camera::{Camera, VIEWPORT},
    clock::{MeditationRefusal, SanityBand, SanityClock},
    config::GameConfig,
    data::{
        items,
        narrative::{
            area_narrative, EndCopy, CHAPTER_ONE_END, CHAPTER_TWO_TEASER, INTRO,
            LENS_CLARITY, MADNESS_END, MADNESS_LINES, MEDITATION_CALM, MEDITATION_SUCCESS,
            MEDITATION_TOO_DARK, MEDITATION_UNSAFE, SHADOW_END, SHADOW_LINES,
        },
    },
    dialogue::{
        text::{murmur, MurmurTrigger},
        Advance, Dialogue,
    },
    effects::{
        scheduler::{EffectContext, HorrorEffects, Selection},
        Cue, EffectKind, Tint,
    },
    error::{GameError, GameResult},
    input::{Action, ActionGate, InputFrame},
    map::{Vec2, Zone},
    player::{MoveIntent, Player, ZoneChange, SPAWN},
    ports::{AudioSink, HeadlessPresenter, Presenter, TracingAudio},
    world::{
        interactables::{Effect, InteractionView, OutcomeStatus},
        HarborWorld, WorldFrame,
    },
};

use self::{
    deferred::{DeferredAction, DeferredQueue},
    inventory::{Acquisition, Inventory},
};

pub const LENS_CLARITY_GAIN: f32 = 15.0;
pub const FINAL_FADE_DELAY: f64 = 3.0;
pub const FINAL_FADE_DURATION: f64 = 10.0;
pub const TEASER_DELAY: f64 = 5.0;
pub const AREA_NARRATIVE_DELAY: f64 = 0.1;
pub const MURMUR_INTERVAL: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// Sanity ran out.
    Sanity,
    /// A crossing shadow reached the player at the brink.
    Shadow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Playing,
    Dialogue,
    GameOver(EndReason),
    ChapterEnd,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver(_) | GamePhase::ChapterEnd)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EndScreen {
    pub title: String,
    pub subtitle: String,
    pub flavor: String,
    pub footer: String,
    pub survival: Option<String>,
    pub reached_at: DateTime<Local>,
}

impl EndScreen {
    pub fn new(copy: &EndCopy, survival: Option<String>) -> Self {
        Self {
            title: copy.title.to_string(),
            subtitle: copy.subtitle.to_string(),
            flavor: copy.flavor.to_string(),
            footer: copy.footer.to_string(),
            survival,
            reached_at: Local::now(),
        }
    }
}

/// `"Xh Ym"` past the hour, `"Ym Zs"` before it.
pub fn format_survival(seconds: f64) -> String {
    let whole = seconds.clamp(0.0, f64::from(i32::MAX)).floor() as i64;
    let span = TimeDelta::seconds(whole);
    let hours = span.num_hours();
    let minutes = span.num_minutes() % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m {}s", span.num_seconds() % 60)
    }
}

/// What one call to `interact` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interaction {
    pub object: &'static str,
    pub status: OutcomeStatus,
}

/// Comparable state for replays.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub time: f64,
    pub hours: f64,
    pub sanity: f32,
    pub phase: GamePhase,
    pub player: Vec2,
    pub stamina: f32,
    pub camera: Vec2,
    pub inside_lighthouse: bool,
    pub inventory: Vec<String>,
    pub effects_triggered: u64,
    pub last_selection: Option<Selection>,
    pub entities: Vec<(u64, Vec2)>,
}

pub struct Game<P: Presenter, A: AudioSink> {
    config: GameConfig,
    clock: SanityClock,
    phase: GamePhase,
    player: Player,
    world: HarborWorld,
    camera: Camera,
    effects: HorrorEffects,
    dialogue: Dialogue,
    dialogue_shown: bool,
    inventory: Inventory,
    inventory_visible: bool,
    deferred: DeferredQueue,
    gate: ActionGate,
    last_interaction: Option<f64>,
    murmur_timer: f64,
    sanity_band: SanityBand,
    location: &'static str,
    end_screen: Option<EndScreen>,
    frame: u64,
    presenter: P,
    audio: A,
}

impl Game<HeadlessPresenter, TracingAudio> {
    /// A session with no terminal attached; dialogue and end screens are
    /// kept in the presenter's transcript.
    pub fn headless(config: GameConfig) -> Self {
        Self::new(config, HeadlessPresenter::default(), TracingAudio)
    }
}

impl<P: Presenter, A: AudioSink> Game<P, A> {
    pub fn new(config: GameConfig, presenter: P, audio: A) -> Self {
        let world = HarborWorld::pale_harbor(config.world_seed);
        let player = Player::new(SPAWN, &world.map);
        let clock = SanityClock::new(config.start_hour, config.start_sanity, config.drift);
        let mut game = Self {
            clock,
            phase: GamePhase::Playing,
            camera: Camera::new(VIEWPORT, player.position),
            player,
            world,
            effects: HorrorEffects::new(),
            dialogue: Dialogue::new(),
            dialogue_shown: false,
            inventory: Inventory::with_items(config.starting_inventory.iter().cloned()),
            inventory_visible: false,
            deferred: DeferredQueue::default(),
            gate: ActionGate::new(config.action_debounce),
            last_interaction: None,
            murmur_timer: 0.0,
            sanity_band: SanityBand::of(config.start_sanity),
            location: Zone::LighthouseEntrance.as_str(),
            end_screen: None,
            frame: 0,
            presenter,
            audio,
            config,
        };
        game.start();
        game
    }

    fn start(&mut self) {
        info!(
            hour = self.clock.hours(),
            sanity = self.clock.sanity(),
            items = self.inventory.len(),
            "session started"
        );
        if let Some(zone) = self.player.current_zone() {
            self.location = zone.as_str();
        }
        self.presenter.set_location(self.location);
        self.presenter.set_inventory(self.inventory.items());
        self.presenter.set_inventory_visible(false);
        if self.config.play_intro {
            self.dialogue.start(INTRO.iter().copied(), self.clock.sanity());
        }
        self.sync_phase();
        self.push_ui();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &SanityClock {
        &self.clock
    }

    pub fn sanity(&self) -> f32 {
        self.clock.sanity()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &HarborWorld {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn effects(&self) -> &HorrorEffects {
        &self.effects
    }

    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_visible(&self) -> bool {
        self.inventory_visible
    }

    pub fn location(&self) -> &'static str {
        self.location
    }

    pub fn end_screen(&self) -> Option<&EndScreen> {
        self.end_screen.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances the session by `dt` real seconds.
    ///
    /// A negative or non-finite delta is refused and nothing changes.
    pub fn update(&mut self, dt: f64, input: &InputFrame) -> GameResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(GameError::InvalidDelta(dt));
        }
        self.frame += 1;
        self.clock.advance(dt);
        self.handle_actions(input);

        if self.phase == GamePhase::Playing {
            self.update_player(dt, &input.intent);
            self.update_world(dt);
            self.camera.follow(self.player.position, dt as f32);
        }
        self.camera.update_shake(self.clock.elapsed());
        self.update_effects(dt);
        if let Some(tone) = self.dialogue.update(dt) {
            self.audio.play(tone);
        }
        self.fire_deferred(dt);
        self.clock.apply_drift(dt);
        self.tick_murmurs(dt);

        if self.clock.is_depleted() {
            self.trigger_game_over(EndReason::Sanity);
        }
        self.sync_phase();
        self.push_ui();
        Ok(())
    }

    fn handle_actions(&mut self, input: &InputFrame) {
        let now = self.clock.elapsed();
        for &action in &input.actions {
            if !self.gate.accept(action, now) {
                continue;
            }
            match action {
                Action::Interact => {
                    self.interact();
                }
                Action::ToggleInventory => self.toggle_inventory(),
                Action::Meditate => {
                    if let Err(refusal) = self.attempt_meditation() {
                        debug!(%refusal, phase = ?self.phase, "meditation refused");
                    }
                }
                Action::AdvanceDialogue => self.advance_dialogue(),
                Action::DescribeItem(slot) => self.describe_item(slot),
            }
            self.sync_phase();
        }
    }

    fn update_player(&mut self, dt: f64, intent: &MoveIntent) {
        let sanity = self.clock.sanity();
        if let Some(change) = self
            .player
            .update(dt as f32, intent, sanity, &self.world.map)
        {
            self.on_zone_change(change);
        }
    }

    fn on_zone_change(&mut self, change: ZoneChange) {
        self.location = change.zone.as_str();
        self.presenter.set_location(self.location);
        if change.first_visit && area_narrative(change.zone).is_some() {
            self.deferred
                .schedule(AREA_NARRATIVE_DELAY, DeferredAction::AreaNarrative(change.zone));
        }
    }

    fn suppressed(&self) -> bool {
        self.phase.is_terminal() || self.world.map.is_critical(self.player.position)
    }

    fn update_world(&mut self, dt: f64) {
        let frame = WorldFrame {
            dt,
            time: self.clock.elapsed(),
            hours: self.clock.hours(),
            sanity: self.clock.sanity(),
            player: self.player.position,
            suppressed: self.suppressed(),
        };
        let events = self.world.update(&frame);
        if events.is_empty() {
            return;
        }
        if events.sanity_loss > 0.0 {
            self.decrease_sanity(events.sanity_loss);
        }
        for shake in events.shakes {
            self.camera.shake(shake);
        }
        for thought in events.thoughts {
            self.dialogue.thought(thought, self.clock.sanity());
        }
        for tone in events.tones {
            self.audio.play(tone);
        }
        if events.shadow_touch {
            self.trigger_game_over(EndReason::Shadow);
        }
    }

    fn update_effects(&mut self, dt: f64) {
        let ctx = EffectContext {
            dt,
            time: self.clock.elapsed(),
            hours: self.clock.hours(),
            sanity: self.clock.sanity(),
            player: self.player.position,
            suppressed: self.suppressed(),
        };
        for cue in self.effects.update(&ctx) {
            self.apply_cue(cue);
        }
    }

    fn apply_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Shake(intensity) => self.camera.shake(intensity),
            Cue::SanityLoss(amount) => self.decrease_sanity(amount),
            Cue::Thought(text) => self.dialogue.thought(text, self.clock.sanity()),
            Cue::Tone(tone) => self.audio.play(tone),
            Cue::SpawnMovingShadow { from, to } => self.world.spawn_moving_shadow(from, to),
            Cue::SkipClock(hours) => self.clock.skip_hours(hours),
            Cue::Defer { delay, action } => self.deferred.schedule(delay, action),
        }
    }

    fn fire_deferred(&mut self, dt: f64) {
        for action in self.deferred.advance(dt) {
            if !action.still_valid(self.phase) {
                debug!(?action, phase = ?self.phase, "deferred action skipped");
                continue;
            }
            debug!(?action, "deferred action");
            match action {
                DeferredAction::AreaNarrative(zone) => {
                    if let Some(narrative) = area_narrative(zone) {
                        self.dialogue
                            .start(narrative.lines.iter().copied(), self.clock.sanity());
                        if narrative.sanity_loss > 0.0 {
                            self.decrease_sanity(narrative.sanity_loss);
                        }
                    }
                }
                DeferredAction::LensClarity => {
                    self.increase_sanity(LENS_CLARITY_GAIN);
                    self.dialogue
                        .start(LENS_CLARITY.iter().copied(), self.clock.sanity());
                }
                DeferredAction::ChapterEnd => self.trigger_chapter_end(),
                DeferredAction::ChapterTeaser => {
                    let screen = EndScreen::new(&CHAPTER_TWO_TEASER, None);
                    self.presenter.show_end_screen(&screen);
                    self.end_screen = Some(screen);
                }
                DeferredAction::SecondFlash => self.effects.screen_flash(Tint::PaleBlue, 0.3, 0.03),
                DeferredAction::Thunder => self.camera.shake(4.0),
                DeferredAction::FinalFade => {
                    self.effects.push(EffectKind::FinalFade, FINAL_FADE_DURATION)
                }
            }
        }
    }

    fn tick_murmurs(&mut self, dt: f64) {
        self.murmur_timer += dt;
        if self.murmur_timer < MURMUR_INTERVAL || self.phase.is_terminal() {
            return;
        }
        self.murmur_timer = 0.0;
        let (sanity, time) = (self.clock.sanity(), self.clock.elapsed());
        let line = murmur(MurmurTrigger::Random, sanity, time)
            .or_else(|| murmur(MurmurTrigger::Environmental, sanity, time));
        if let Some(line) = line {
            self.presenter.push_log(line);
        }
    }

    fn sync_phase(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = if self.dialogue.is_active() {
            GamePhase::Dialogue
        } else {
            GamePhase::Playing
        };
    }

    fn push_ui(&mut self) {
        let sanity = self.clock.sanity();
        let band = SanityBand::of(sanity);
        if band != self.sanity_band {
            info!(sanity, from = ?self.sanity_band, to = ?band, "sanity band changed");
            self.sanity_band = band;
        }
        self.presenter.set_sanity(sanity, band);
        self.presenter
            .set_clock(&self.clock.clock_label(), self.clock.day_band());
        match self.dialogue.view(sanity, self.clock.elapsed()) {
            Some(view) => {
                self.presenter.show_dialogue(&view);
                self.dialogue_shown = true;
            }
            None if self.dialogue_shown => {
                self.presenter.hide_dialogue();
                self.dialogue_shown = false;
            }
            None => {}
        }
    }

    /// Removes sanity, clamped at zero. The camera shakes by half the amount.
    pub fn decrease_sanity(&mut self, amount: f32) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.clock.decrease(amount);
        self.camera.shake(amount / 2.0);
    }

    pub fn increase_sanity(&mut self, amount: f32) {
        if amount.is_finite() && amount > 0.0 {
            self.clock.increase(amount);
        }
    }

    /// Adds an item once. The first pickup of a story item restores a little
    /// sanity.
    pub fn add_to_inventory(&mut self, item: &str) -> Acquisition {
        let acquisition = self.inventory.add(item);
        match acquisition {
            Acquisition::Added { first_important } => {
                if first_important {
                    self.increase_sanity(items::IMPORTANT_ITEM_BONUS);
                    info!(item, "important item found");
                } else {
                    debug!(item, "item added");
                }
                self.presenter.set_inventory(self.inventory.items());
            }
            Acquisition::Duplicate => debug!(item, "item already held"),
        }
        acquisition
    }

    /// Uses the nearest interactable in reach. Ignored outside free play and
    /// within the cooldown of the previous press.
    pub fn interact(&mut self) -> Option<Interaction> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let now = self.clock.elapsed();
        if self
            .last_interaction
            .is_some_and(|at| now - at < self.config.interaction_cooldown)
        {
            return None;
        }
        self.last_interaction = Some(now);

        let idx = self.world.interactables.nearest(self.player.position)?;
        let inside_lighthouse = self.world.inside_lighthouse();
        let view = InteractionView {
            sanity: self.clock.sanity(),
            hours: self.clock.hours(),
            actor: self.player.position,
            inside_lighthouse,
            inventory: &self.inventory,
        };
        let entry = self.world.interactables.get_mut(idx)?;
        let object = entry.name;
        let outcome = entry.interact(&view);
        info!(object, status = ?outcome.status, "interaction");

        self.dialogue
            .start(outcome.lines.iter().copied(), self.clock.sanity());
        for effect in outcome.effects {
            self.apply_effect(effect);
        }
        self.sync_phase();
        Some(Interaction {
            object,
            status: outcome.status,
        })
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Grant(item) => {
                self.add_to_inventory(item);
            }
            Effect::Sanity(delta) if delta < 0.0 => self.decrease_sanity(-delta),
            Effect::Sanity(delta) => self.increase_sanity(delta),
            Effect::Teleport(to) => {
                if let Some(change) = self.player.teleport(to, &self.world.map) {
                    self.on_zone_change(change);
                }
            }
            Effect::AdvanceClock(hours) => self.clock.skip_hours(hours),
            Effect::EnterLighthouse => self.world.enter_lighthouse(),
            Effect::ExitLighthouse => self.world.exit_lighthouse(),
            Effect::Flash {
                tint,
                intensity,
                duration,
            } => self.effects.screen_flash(tint, intensity, duration),
            Effect::Shake(intensity) => self.camera.shake(intensity),
            Effect::Defer { delay, action } => self.deferred.schedule(delay, action),
        }
    }

    /// Meditation in daylight, away from the water. Refusals are shown as
    /// dialogue and change nothing else; outside free play the attempt is
    /// `Busy` and shows nothing.
    pub fn attempt_meditation(&mut self) -> Result<f32, MeditationRefusal> {
        if self.phase != GamePhase::Playing {
            return Err(MeditationRefusal::Busy);
        }
        let unsafe_spot = self.world.map.is_unsafe(self.player.position);
        let sanity = self.clock.sanity();
        match self.clock.meditate(unsafe_spot) {
            Ok(gain) => {
                let mut lines: Vec<String> =
                    MEDITATION_SUCCESS.iter().map(|l| l.to_string()).collect();
                lines.push(format!("You feel much more at peace. (+{gain} Sanity)"));
                self.dialogue.start(lines, sanity);
                info!(gain, hour = self.clock.hours(), "meditated");
                self.sync_phase();
                Ok(gain)
            }
            Err(refusal) => {
                let lines = match refusal {
                    MeditationRefusal::TooDark => MEDITATION_TOO_DARK,
                    MeditationRefusal::AlreadyCalm => MEDITATION_CALM,
                    MeditationRefusal::UnsafeLocation => MEDITATION_UNSAFE,
                    MeditationRefusal::Busy => return Err(refusal),
                };
                self.dialogue.start(lines.iter().copied(), sanity);
                self.sync_phase();
                Err(refusal)
            }
        }
    }

    /// Opens the description of the item in `slot`.
    pub fn describe_item(&mut self, slot: usize) {
        if self.phase.is_terminal() {
            return;
        }
        let Some(item) = self.inventory.get(slot) else {
            debug!(slot, "no item in slot");
            return;
        };
        let lines = items::describe(item);
        self.dialogue.start(lines, self.clock.sanity());
        self.sync_phase();
    }

    pub fn toggle_inventory(&mut self) {
        self.inventory_visible = !self.inventory_visible;
        debug!(visible = self.inventory_visible, items = ?self.inventory.items(), "inventory");
        self.presenter.set_inventory_visible(self.inventory_visible);
    }

    pub fn advance_dialogue(&mut self) {
        if self.dialogue.advance(self.clock.sanity()) == Advance::Closed {
            self.sync_phase();
        }
    }

    /// Closes any open dialogue at once.
    pub fn dismiss_dialogue(&mut self) {
        self.dialogue.close();
        self.sync_phase();
    }

    pub fn screen_flash(&mut self, tint: Tint, intensity: f32, duration: f64) {
        self.effects.screen_flash(tint, intensity, duration);
    }

    /// Ends the session. Only the first call has any effect.
    pub fn trigger_game_over(&mut self, reason: EndReason) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = GamePhase::GameOver(reason);
        let survival = format_survival(self.clock.elapsed());
        info!(?reason, survived = %survival, hour = self.clock.hours(), "game over");

        let (lines, copy, flash, flash_duration, shake) = match reason {
            EndReason::Sanity => (MADNESS_LINES, &MADNESS_END, 1.0, 5.0, 20.0),
            EndReason::Shadow => (SHADOW_LINES, &SHADOW_END, 0.9, 3.0, 15.0),
        };
        self.dialogue.start(lines.iter().copied(), self.clock.sanity());
        self.effects.screen_flash(Tint::Black, flash, flash_duration);
        self.camera.shake(shake);
        self.deferred
            .schedule(FINAL_FADE_DELAY, DeferredAction::FinalFade);

        let screen = EndScreen::new(copy, Some(survival));
        self.presenter.show_end_screen(&screen);
        self.end_screen = Some(screen);
    }

    pub fn trigger_chapter_end(&mut self) {
        if self.phase.is_terminal() {
            warn!(phase = ?self.phase, "chapter end after the session ended");
            return;
        }
        self.phase = GamePhase::ChapterEnd;
        let survival = format_survival(self.clock.elapsed());
        info!(survived = %survival, "chapter one complete");
        let screen = EndScreen::new(&CHAPTER_ONE_END, Some(survival));
        self.presenter.show_end_screen(&screen);
        self.end_screen = Some(screen);
        self.deferred
            .schedule(TEASER_DELAY, DeferredAction::ChapterTeaser);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            time: self.clock.elapsed(),
            hours: self.clock.hours(),
            sanity: self.clock.sanity(),
            phase: self.phase,
            player: self.player.position,
            stamina: self.player.stamina,
            camera: self.camera.position,
            inside_lighthouse: self.world.inside_lighthouse(),
            inventory: self.inventory.items().to_vec(),
            effects_triggered: self.effects.triggered(),
            last_selection: self.effects.last_selection(),
            entities: self.world.ecs.dynamic_positions(),
        }
    }
}

impl<P: Presenter, A: AudioSink> std::fmt::Debug for Game<P, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("frame", &self.frame)
            .field("phase", &self.phase)
            .field("sanity", &self.clock.sanity())
            .field("hours", &self.clock.hours())
            .field("location", &self.location)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::DayBand,
        ports::{MockAudioSink, MockPresenter, NullAudio, NullPresenter},
    };

    fn quiet(start_hour: f64, sanity: f32) -> GameConfig {
        GameConfig {
            start_hour,
            start_sanity: sanity,
            play_intro: false,
            ..GameConfig::default()
        }
    }

    fn game(start_hour: f64, sanity: f32) -> Game<NullPresenter, NullAudio> {
        Game::new(quiet(start_hour, sanity), NullPresenter, NullAudio)
    }

    #[test]
    fn test_survival_format() {
        assert_eq!(format_survival(75.4), "1m 15s");
        assert_eq!(format_survival(3_725.0), "1h 2m");
        assert_eq!(format_survival(-3.0), "0m 0s");
    }

    #[test]
    fn test_rejects_bad_delta_without_change() {
        let mut g = game(12.0, 80.0);
        let before = g.snapshot();
        assert!(matches!(
            g.update(f64::NAN, &InputFrame::idle()),
            Err(GameError::InvalidDelta(_))
        ));
        assert!(g.update(-0.5, &InputFrame::idle()).is_err());
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn test_intro_opens_dialogue_phase() {
        let config = GameConfig {
            play_intro: true,
            ..GameConfig::default()
        };
        let g = Game::new(config, NullPresenter, NullAudio);
        assert_eq!(g.phase(), GamePhase::Dialogue);
        assert_eq!(g.location(), "Lighthouse Entrance");
    }

    #[test]
    fn test_sanity_loss_shakes_by_half() {
        let mut g = game(12.0, 80.0);
        g.decrease_sanity(150.0);
        assert_eq!(g.sanity(), 0.0);
        assert_eq!(g.camera().shake_magnitude(), 75.0);
        g.increase_sanity(500.0);
        assert_eq!(g.sanity(), 100.0);
    }

    #[test]
    fn test_important_item_pays_once() {
        let mut g = game(12.0, 50.0);
        assert_eq!(
            g.add_to_inventory("Cursed Tome"),
            Acquisition::Added {
                first_important: true
            }
        );
        assert_eq!(g.sanity(), 55.0);
        assert_eq!(g.add_to_inventory("Cursed Tome"), Acquisition::Duplicate);
        assert_eq!(g.sanity(), 55.0);
        g.add_to_inventory("Rusty Nail");
        assert_eq!(g.sanity(), 55.0);
    }

    #[test]
    fn test_interaction_cooldown() {
        let mut g = game(12.0, 80.0);
        g.add_to_inventory("Lighthouse Key");
        let first = g.interact();
        assert_eq!(first.map(|i| i.object), Some("Lighthouse Door"));
        g.dismiss_dialogue();
        assert_eq!(g.interact(), None);
    }

    #[test]
    fn test_game_over_fires_once_and_fades_later() {
        let mut g = game(12.0, 80.0);
        g.trigger_game_over(EndReason::Shadow);
        g.trigger_game_over(EndReason::Sanity);
        assert_eq!(g.phase(), GamePhase::GameOver(EndReason::Shadow));
        assert_eq!(g.end_screen().map(|s| s.title.as_str()), Some("SHADOW TOUCHED"));
        g.trigger_chapter_end();
        assert_eq!(g.phase(), GamePhase::GameOver(EndReason::Shadow));

        for _ in 0..40 {
            g.update(0.1, &InputFrame::idle()).unwrap();
        }
        assert!(g
            .effects()
            .effects()
            .iter()
            .any(|e| e.kind == EffectKind::FinalFade));
    }

    #[test]
    fn test_chapter_end_then_teaser() {
        let mut g = game(12.0, 80.0);
        g.trigger_chapter_end();
        assert_eq!(g.phase(), GamePhase::ChapterEnd);
        assert_eq!(g.end_screen().map(|s| s.title.as_str()), Some("CHAPTER ONE COMPLETE"));
        for _ in 0..55 {
            g.update(0.1, &InputFrame::idle()).unwrap();
        }
        assert_eq!(g.end_screen().map(|s| s.title.as_str()), Some("CHAPTER TWO"));
    }

    #[test]
    fn test_meditation_refused_at_night_changes_nothing() {
        let mut g = game(2.0, 50.0);
        let hours = g.clock().hours();
        assert_eq!(g.attempt_meditation(), Err(MeditationRefusal::TooDark));
        assert_eq!(g.sanity(), 50.0);
        assert_eq!(g.clock().hours(), hours);
        assert_eq!(g.phase(), GamePhase::Dialogue);
    }

    #[test]
    fn test_meditation_while_talking_is_busy() {
        let mut g = game(12.0, 50.0);
        g.describe_item(0);
        assert_eq!(g.phase(), GamePhase::Dialogue);
        let talk = g.dialogue().clone();
        let hours = g.clock().hours();
        assert_eq!(g.attempt_meditation(), Err(MeditationRefusal::Busy));
        assert_eq!(g.dialogue(), &talk);
        assert_eq!(g.sanity(), 50.0);
        assert_eq!(g.clock().hours(), hours);

        let mut input = InputFrame::idle();
        input.actions.push(Action::Meditate);
        g.update(0.016, &input).unwrap();
        assert!(g.sanity() < 50.1);
        assert!(g.clock().hours() < hours + 0.01);
        assert_eq!(g.phase(), GamePhase::Dialogue);
    }

    #[test]
    fn test_describe_item_opens_description() {
        let mut g = game(12.0, 80.0);
        g.describe_item(0);
        assert!(g.dialogue().is_active());
        g.dismiss_dialogue();
        g.describe_item(7);
        assert!(!g.dialogue().is_active());
    }

    #[test]
    fn test_presenter_receives_inventory_toggle() {
        let mut presenter = MockPresenter::new();
        presenter.expect_set_location().returning(|_| ());
        presenter.expect_set_inventory().returning(|_| ());
        presenter
            .expect_set_inventory_visible()
            .withf(|visible| !*visible)
            .times(1)
            .returning(|_| ());
        presenter
            .expect_set_inventory_visible()
            .withf(|visible| *visible)
            .times(1)
            .returning(|_| ());
        presenter.expect_set_sanity().returning(|_, _| ());
        presenter
            .expect_set_clock()
            .withf(|label, band| label == "12:00" && *band == DayBand::Day)
            .returning(|_, _| ());
        let mut g = Game::new(quiet(12.0, 80.0), presenter, NullAudio);
        g.toggle_inventory();
        assert!(g.inventory_visible());
    }

    #[test]
    fn test_dialogue_clicks_reach_audio() {
        let mut audio = MockAudioSink::new();
        audio.expect_play().times(1..).returning(|_| ());
        let config = GameConfig {
            play_intro: true,
            start_hour: 12.0,
            ..GameConfig::default()
        };
        let mut g = Game::new(config, NullPresenter, audio);
        for _ in 0..10 {
            g.update(1.0 / 60.0, &InputFrame::idle()).unwrap();
        }
        assert!(g.dialogue().is_active());
    }
}

//! Scene drawing against a minimal immediate-mode surface.

pub mod canvas;
pub mod hud;

use bracket_terminal::prelude::*;

use crate::{
    effects::{Apparition, Overlay, Pattern, Tint},
    field,
    game::Game,
    map::{Bounds, PropKind, Vec2},
    player::{PLAYER_HEIGHT, PLAYER_WIDTH},
    ports::{AudioSink, Presenter},
};

pub use canvas::CellCanvas;
pub use hud::HudPresenter;

const LAMP_GLOW_RADIUS: f32 = 40.0;
const STATIC_SPECKS: u32 = 120;
const SHADOW_COLUMN_SPACING: f32 = 80.0;

/// 2D drawing with a translation stack.
pub trait Surface {
    /// Drawable area in pixels.
    fn size(&self) -> Vec2;
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, by: Vec2);
    /// Blends `color` over the area.
    fn fill_rect(&mut self, rect: Bounds, color: RGB, alpha: f32);
    /// Draws `glyph` over the area.
    fn stamp(&mut self, rect: Bounds, glyph: u16, color: RGB, alpha: f32);
    fn text(&mut self, at: Vec2, text: &str, color: RGB);
}

pub fn tint_color(tint: Tint) -> RGB {
    let (r, g, b) = tint.rgb();
    RGB::from_u8(r, g, b)
}

fn centered(point: Vec2, extent: Vec2) -> Bounds {
    Bounds::new(
        point.x - extent.x * 0.5,
        point.y - extent.y * 0.5,
        extent.x,
        extent.y,
    )
}

/// The single cell containing `point`.
fn spot(point: Vec2) -> Bounds {
    Bounds::new(point.x, point.y, 0.0, 0.0)
}

fn is_night(hours: f64) -> bool {
    !(6.0..=20.0).contains(&hours)
}

/// Draws one frame of the harbor as the game currently stands.
pub fn draw_scene<S, P, A>(surface: &mut S, game: &Game<P, A>)
where
    S: Surface,
    P: Presenter,
    A: AudioSink,
{
    let size = surface.size();
    let screen = Bounds::new(0.0, 0.0, size.x, size.y);
    let time = game.clock().elapsed();
    let hours = game.clock().hours();
    let sanity = game.sanity();
    let world = game.world();
    let inside = world.inside_lighthouse();
    let origin = game.camera().origin();

    if inside {
        surface.fill_rect(screen, RGB::from_u8(30, 24, 20), 1.0);
    } else {
        surface.fill_rect(screen, RGB::from_u8(18, 36, 22), 1.0);
        draw_water(surface, game, origin, size);
    }

    surface.save();
    surface.translate(Vec2::new(-origin.x, -origin.y));

    world.ecs.each_renderable(|point, extent, renderable| {
        let area = centered(point, extent);
        if extent.x > 12.0 || extent.y > 12.0 {
            surface.fill_rect(area, renderable.color, renderable.opacity * 0.35);
        }
        surface.stamp(area, renderable.glyph, renderable.color, renderable.opacity);
    });

    if !inside && is_night(hours) {
        for lamp in world.map.props.iter().filter(|p| p.kind == PropKind::Lamppost) {
            let center = lamp.bounds.center();
            let glow = field::lamp_flicker(time, center.x, sanity);
            let extent = Vec2::new(LAMP_GLOW_RADIUS * 2.0, LAMP_GLOW_RADIUS * 2.0);
            surface.fill_rect(centered(center, extent), tint_color(Tint::Lamp), glow * 0.3);
        }
    }

    let player = game.player().position;
    for object in world.interactables.iter().filter(|o| !o.is_gone()) {
        let center = object.center();
        surface.stamp(
            spot(center),
            to_cp437('!'),
            RGB::named(YELLOW),
            1.0,
        );
        if object.can_interact(player) {
            surface.text(Vec2::new(center.x - 15.0, center.y - 24.0), "[E]", RGB::named(YELLOW));
        }
    }

    for vision in game.effects().hallucinations() {
        let glyph = match vision.kind {
            Apparition::PhantomPerson => to_cp437('☻'),
            Apparition::VanishingObject => to_cp437('?'),
            Apparition::FalseExit => to_cp437('∩'),
            Apparition::MirrorSelf => to_cp437('@'),
        };
        surface.stamp(
            centered(vision.position, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            glyph,
            RGB::from_u8(200, 200, 220),
            vision.alpha(),
        );
    }

    surface.stamp(
        spot(player),
        to_cp437('@'),
        RGB::named(WHITE),
        1.0,
    );
    surface.restore();

    let atmosphere = game.effects().atmosphere(hours, sanity);
    surface.fill_rect(screen, RGB::named(BLACK), game.clock().time_alpha() * 0.5);
    surface.fill_rect(screen, RGB::from_u8(0, 0, 40), atmosphere.night_alpha);
    if !inside {
        surface.fill_rect(screen, RGB::from_u8(150, 150, 160), atmosphere.fog_alpha * 0.3);
    }
    surface.fill_rect(screen, tint_color(Tint::Maroon), atmosphere.distortion);

    for overlay in game.effects().overlays() {
        draw_overlay(surface, &overlay, screen);
    }
}

fn draw_water<S, P, A>(surface: &mut S, game: &Game<P, A>, origin: Vec2, size: Vec2)
where
    S: Surface,
    P: Presenter,
    A: AudioSink,
{
    let world = game.world();
    let time = game.clock().elapsed();
    let sanity = game.sanity();
    let step = Vec2::new(canvas::CELL_WIDTH, canvas::CELL_HEIGHT);
    let deep = RGB::from_u8(10, 20, 45);
    let crest = RGB::from_u8(60, 90, 130);

    let mut y = 0.0;
    while y < size.y {
        let mut x = 0.0;
        while x < size.x {
            let point = Vec2::new(origin.x + x + step.x * 0.5, origin.y + y + step.y * 0.5);
            if world.map.is_water(point) {
                let height = world.water_height(point, time, sanity);
                let shade = ((height + 1.0) * 0.5).clamp(0.0, 1.0);
                let cell = Bounds::new(x, y, step.x, step.y);
                surface.fill_rect(cell, deep.lerp(crest, shade), 1.0);
                if shade > 0.65 {
                    surface.stamp(cell, to_cp437('~'), RGB::from_u8(140, 170, 200), shade);
                }
            }
            x += step.x;
        }
        y += step.y;
    }
}

fn draw_overlay<S: Surface>(surface: &mut S, overlay: &Overlay, screen: Bounds) {
    let color = tint_color(overlay.tint);
    match overlay.pattern {
        Pattern::Fill => surface.fill_rect(screen, color, overlay.alpha),
        Pattern::Static { seed } => {
            for i in 0..STATIC_SPECKS {
                let x = field::spatial(f64::from(i) * 37.0, 0.0, seed * 13.0, i) as f32;
                let y = field::spatial(0.0, f64::from(i) * 53.0, seed * 17.0, i + 1) as f32;
                let speck = Bounds::new(x * screen.width, y * screen.height, 1.0, 1.0);
                surface.stamp(speck, to_cp437('░'), color, overlay.alpha);
            }
        }
        Pattern::Columns => {
            let mut x = 0.0;
            while x < screen.width {
                let column = Bounds::new(x, 0.0, SHADOW_COLUMN_SPACING * 0.4, screen.height * 0.4);
                surface.fill_rect(column, color, overlay.alpha);
                x += SHADOW_COLUMN_SPACING;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_geometry::prelude::Point;
    use crate::config::GameConfig;

    fn config() -> GameConfig {
        GameConfig {
            start_hour: 12.0,
            play_intro: false,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_player_is_drawn_at_screen_center() {
        let game = Game::headless(config());
        let mut canvas = CellCanvas::new(80, 50);
        draw_scene(&mut canvas, &game);
        assert_eq!(canvas.cell(Point::new(40, 25)).map(|c| c.glyph), Some(to_cp437('@')));
    }

    #[test]
    fn test_flash_overlay_tints_the_whole_screen() {
        let mut game = Game::headless(config());
        let mut plain = CellCanvas::new(80, 50);
        draw_scene(&mut plain, &game);

        game.screen_flash(Tint::Red, 0.8, 1.0);
        let mut flashed = CellCanvas::new(80, 50);
        draw_scene(&mut flashed, &game);

        let corner = |c: &CellCanvas| c.cell(Point::new(0, 0)).map(|cell| cell.bg.r).unwrap_or(0.0);
        assert!(corner(&flashed) > corner(&plain));
    }
}

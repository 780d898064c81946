use bracket_terminal::prelude::*;

use crate::{
    clock::{DayBand, SanityBand, MAX_SANITY},
    dialogue::{text::EmphasisSpan, DialogueView},
    game::EndScreen,
    ports::Presenter,
};

const LOG_MAX_ENTRIES: usize = 5;
const SANITY_BAR_WIDTH: i32 = 20;
const DIALOGUE_ROWS: i32 = 6;

fn rgb((r, g, b): (u8, u8, u8)) -> RGB {
    RGB::from_u8(r, g, b)
}

fn band_color(band: SanityBand) -> RGB {
    match band {
        SanityBand::Steady => RGB::from_u8(80, 200, 120),
        SanityBand::Uneasy => RGB::named(YELLOW),
        SanityBand::Fractured => RGB::named(RED),
    }
}

/// Splits `text` into rows of at most `width` characters, breaking on spaces.
/// Returns each row with the char offset it starts at.
pub fn wrap(text: &str, width: usize) -> Vec<(usize, String)> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_start = 0;
    let mut offset = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        if !row.is_empty() && row.chars().count() + 1 + len > width {
            rows.push((row_start, std::mem::take(&mut row)));
            row_start = offset;
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(word);
        offset += len + 1;
    }
    if !row.is_empty() || rows.is_empty() {
        rows.push((row_start, row));
    }
    rows
}

fn emphasis_at(spans: &[EmphasisSpan], idx: usize) -> Option<RGB> {
    spans
        .iter()
        .find(|span| idx >= span.start && idx < span.end)
        .map(|span| rgb(span.emphasis.rgb()))
}

/// Terminal HUD: keeps what the game pushes and draws it over the scene.
#[derive(Clone, Debug, Default)]
pub struct HudPresenter {
    sanity: f32,
    band: Option<SanityBand>,
    clock: String,
    day: Option<DayBand>,
    location: String,
    inventory: Vec<String>,
    inventory_visible: bool,
    dialogue: Option<DialogueView>,
    log: Vec<String>,
    end_screen: Option<EndScreen>,
}

impl HudPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn dialogue(&self) -> Option<&DialogueView> {
        self.dialogue.as_ref()
    }

    pub fn end_screen(&self) -> Option<&EndScreen> {
        self.end_screen.as_ref()
    }

    pub fn draw(&self, ctx: &mut BTerm) {
        if let Some(screen) = &self.end_screen {
            self.draw_end_screen(ctx, screen);
            return;
        }
        self.draw_status(ctx);
        if self.inventory_visible {
            self.draw_inventory(ctx);
        }
        self.draw_log(ctx);
        if let Some(view) = &self.dialogue {
            self.draw_dialogue(ctx, view);
        }
    }

    fn draw_status(&self, ctx: &mut BTerm) {
        let (width, _) = ctx.get_char_size();
        ctx.draw_box(0, 0, width - 1, 2, RGB::named(GRAY), RGB::named(BLACK));

        let band = self.band.unwrap_or(SanityBand::Steady);
        let filled = ((self.sanity / MAX_SANITY) * SANITY_BAR_WIDTH as f32).round() as i32;
        ctx.print_color(2, 1, RGB::named(WHITE), RGB::named(BLACK), "Sanity");
        for i in 0..SANITY_BAR_WIDTH {
            let (glyph, fg) = if i < filled {
                (to_cp437('█'), band_color(band))
            } else {
                (to_cp437('░'), RGB::named(DARK_GRAY))
            };
            ctx.set(9 + i, 1, fg, RGB::named(BLACK), glyph);
        }
        ctx.print_color(
            10 + SANITY_BAR_WIDTH,
            1,
            band_color(band),
            RGB::named(BLACK),
            format!("{:>3.0}", self.sanity),
        );

        let status = self.day.map(DayBand::status).unwrap_or("");
        ctx.print_color(
            36,
            1,
            RGB::named(LIGHT_BLUE),
            RGB::named(BLACK),
            format!("{}{}", self.clock, status),
        );
        let location_x = width as i32 - 2 - self.location.chars().count() as i32;
        ctx.print_color(
            location_x.max(0),
            1,
            RGB::named(LIGHT_CYAN),
            RGB::named(BLACK),
            &self.location,
        );
    }

    fn draw_inventory(&self, ctx: &mut BTerm) {
        let (width, _) = ctx.get_char_size();
        let height = self.inventory.len().max(1) as i32 + 2;
        let left = width as i32 - 30;
        ctx.draw_box(left, 4, 28, height, RGB::named(GRAY), RGB::named(BLACK));
        ctx.print_color(left + 2, 4, RGB::named(WHITE), RGB::named(BLACK), "Inventory");
        if self.inventory.is_empty() {
            ctx.print_color(left + 2, 5, RGB::named(DARK_GRAY), RGB::named(BLACK), "(empty)");
        }
        for (idx, item) in self.inventory.iter().enumerate() {
            let label = format!("[{}] {}", idx + 1, item);
            ctx.print_color(left + 2, 5 + idx as i32, RGB::named(WHITE), RGB::named(BLACK), &label);
        }
    }

    fn draw_log(&self, ctx: &mut BTerm) {
        if self.log.is_empty() {
            return;
        }
        for (row, entry) in self.log.iter().enumerate() {
            ctx.print_color(
                2,
                4 + row as i32,
                RGB::from_u8(150, 150, 170),
                RGB::named(BLACK),
                entry,
            );
        }
    }

    fn draw_dialogue(&self, ctx: &mut BTerm, view: &DialogueView) {
        let (width, height) = ctx.get_char_size();
        let (width, height) = (width as i32, height as i32);
        let top = height - DIALOGUE_ROWS - 1;
        let bg = rgb(view.style.background);
        ctx.draw_box(1, top, width - 3, DIALOGUE_ROWS, rgb(view.style.border), bg);

        let text_color = rgb(view.style.text);
        let rows = wrap(&view.text, (width - 6) as usize);
        for (row, (start, line)) in rows.iter().take((DIALOGUE_ROWS - 2) as usize).enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let fg = emphasis_at(&view.emphasis, start + col).unwrap_or(text_color);
                ctx.set(3 + col as i32, top + 1 + row as i32, fg, bg, to_cp437(ch));
            }
        }
        if view.complete {
            let hint = if view.index + 1 < view.total {
                "[Space] next"
            } else {
                "[Space] close"
            };
            ctx.print_color(
                width - 4 - hint.len() as i32,
                top + DIALOGUE_ROWS,
                RGB::named(DARK_GRAY),
                bg,
                hint,
            );
        }
    }

    fn draw_end_screen(&self, ctx: &mut BTerm, screen: &EndScreen) {
        let (width, height) = ctx.get_char_size();
        ctx.draw_box(
            4,
            8,
            width - 9,
            height - 17,
            RGB::named(DARK_RED),
            RGB::named(BLACK),
        );
        ctx.print_color_centered(12, RGB::named(RED), RGB::named(BLACK), &screen.title);
        ctx.print_color_centered(14, RGB::named(WHITE), RGB::named(BLACK), &screen.subtitle);
        for (row, (_, line)) in wrap(&screen.flavor, width as usize - 16).iter().enumerate() {
            ctx.print_color_centered(
                17 + row as i32,
                RGB::named(GRAY),
                RGB::named(BLACK),
                line,
            );
        }
        if let Some(survival) = &screen.survival {
            ctx.print_color_centered(
                24,
                RGB::named(LIGHT_BLUE),
                RGB::named(BLACK),
                format!("Survived {survival}"),
            );
        }
        ctx.print_color_centered(28, RGB::named(YELLOW), RGB::named(BLACK), &screen.footer);
    }
}

impl Presenter for HudPresenter {
    fn set_sanity(&mut self, value: f32, band: SanityBand) {
        self.sanity = value;
        self.band = Some(band);
    }

    fn set_clock(&mut self, label: &str, band: DayBand) {
        self.clock.clear();
        self.clock.push_str(label);
        self.day = Some(band);
    }

    fn set_location(&mut self, label: &str) {
        self.location = label.to_string();
    }

    fn set_inventory(&mut self, items: &[String]) {
        self.inventory = items.to_vec();
    }

    fn set_inventory_visible(&mut self, visible: bool) {
        self.inventory_visible = visible;
    }

    fn show_dialogue(&mut self, view: &DialogueView) {
        self.dialogue = Some(view.clone());
    }

    fn hide_dialogue(&mut self) {
        self.dialogue = None;
    }

    fn push_log(&mut self, line: &str) {
        self.log.insert(0, line.to_string());
        self.log.truncate(LOG_MAX_ENTRIES);
    }

    fn show_end_screen(&mut self, screen: &EndScreen) {
        self.end_screen = Some(screen.clone());
    }
}

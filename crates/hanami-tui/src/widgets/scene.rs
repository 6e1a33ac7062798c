use std::f32::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
};

use hanami_scene::{
    characters::Character,
    props::{PropKind, HEART_RING_COUNT},
    Scene,
};
use hanami_story::Speaker;

const FLOWER_PALETTE: [Color; 4] = [
    Color::LightMagenta,
    Color::LightRed,
    Color::Magenta,
    Color::Yellow,
];

const SPRITE_HEIGHT: i32 = 4;

const NOBITA_SPRITE: [&str; 4] = [" ___ ", "(o-o)", "/|█|\\", " d b "];
const SHIZUKA_SPRITE: [&str; 4] = [" ~~~ ", "(^.^)", "/|♥|\\", " | | "];

/// Draws the grove, the couple and the effects from scene state.
pub struct SceneWidget<'a> {
    scene: &'a Scene,
    block: Option<Block<'a>>,
}

impl<'a> SceneWidget<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }

        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width < 24 || inner.height < 10 {
            put(
                buf,
                inner,
                0,
                0,
                "(enlarge the terminal to see the scene)",
                Style::default().fg(Color::Gray),
            );
            return;
        }

        let scene = self.scene;
        // Scene x spans roughly [-6, 6]; the pan offset shifts everything
        // except the floating hearts, which are an overlay.
        let ux = inner.width as f32 / 13.0;
        let center = inner.width as i32 / 2 - i32::from(scene.view.dx);
        let horizon = inner.height as i32 - 2 + i32::from(scene.view.dy);

        let col_of = |x: f32| center + (x * ux).round() as i32;
        // Distant props sit a few rows up from the ground line.
        let row_of = |z: f32| horizon - (((5.0 - z) * 0.5).round() as i32).clamp(0, 6);

        for col in 0..inner.width as i32 {
            put(
                buf,
                inner,
                col,
                horizon + 1,
                "▔",
                Style::default().fg(Color::Green),
            );
        }

        // far to near
        let mut props: Vec<_> = scene.props.iter().collect();
        props.sort_by(|a, b| a.z.partial_cmp(&b.z).unwrap_or(std::cmp::Ordering::Equal));
        for prop in props {
            let col = col_of(prop.x);
            let row = row_of(prop.z);
            match prop.kind {
                PropKind::CherryTree => draw_tree(buf, inner, col, row),
                PropKind::Flower(c) => {
                    let color = FLOWER_PALETTE[c as usize % FLOWER_PALETTE.len()];
                    put(buf, inner, col, row, "❀", Style::default().fg(color));
                }
                PropKind::Grass => put(
                    buf,
                    inner,
                    col,
                    row,
                    "\"",
                    Style::default().fg(Color::LightGreen),
                ),
            }
        }

        for i in 0..HEART_RING_COUNT {
            let angle = scene.heart_ring.angle + (i as f32 / HEART_RING_COUNT as f32) * TAU;
            let col = center + (angle.cos() * 8.0).round() as i32;
            let row = horizon
                - 7
                - (scene.heart_ring.bob * 10.0).round() as i32
                - (angle.sin() * 1.5).round() as i32;
            put(buf, inner, col, row, "♥", Style::default().fg(Color::LightRed));
        }

        draw_proposal_ring(buf, inner, center, horizon, scene);

        for character in &scene.characters {
            draw_character(buf, inner, character, col_of(character.x), horizon, scene.time);
        }
        if scene.embraced() {
            put(
                buf,
                inner,
                center,
                horizon - 2,
                "♥",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            );
        }

        for heart in scene.particles.iter() {
            let col = (heart.col * inner.width.saturating_sub(1) as f32).round() as i32;
            let row =
                inner.height as i32 - 1 - (heart.rise() * (inner.height as f32 - 1.0)).round() as i32;
            put(
                buf,
                inner,
                col,
                row,
                &heart.glyph.to_string(),
                Style::default().fg(Color::LightMagenta),
            );
        }
    }
}

fn draw_tree(buf: &mut Buffer, inner: Rect, col: i32, row: i32) {
    let blossom = Style::default().fg(Color::LightMagenta);
    put(buf, inner, col - 1, row - 2, "❀❀❀", blossom);
    put(buf, inner, col - 2, row - 1, "❀❀❀❀❀", blossom);
    put(buf, inner, col, row, "┃", Style::default().fg(Color::Yellow));
}

fn draw_character(
    buf: &mut Buffer,
    inner: Rect,
    character: &Character,
    col: i32,
    horizon: i32,
    time: f32,
) {
    let (sprite, color, label) = match character.speaker {
        Speaker::Nobita => (&NOBITA_SPRITE, Color::LightBlue, "Nobita"),
        Speaker::Shizuka => (&SHIZUKA_SPRITE, Color::LightMagenta, "Shizuka"),
        Speaker::Both => return,
    };

    let bob = (character.bob(time) * 25.0).round() as i32;
    let hop = if character.hopping { 1 } else { 0 };
    let top = horizon - SPRITE_HEIGHT + 1 - bob - hop;

    for (i, line) in sprite.iter().enumerate() {
        put(buf, inner, col - 2, top + i as i32, line, Style::default().fg(color));
    }

    let label_col = col - label.len() as i32 / 2;
    put(
        buf,
        inner,
        label_col,
        top - 2,
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    );
}

fn draw_proposal_ring(buf: &mut Buffer, inner: Rect, center: i32, horizon: i32, scene: &Scene) {
    let lift = if scene.ring.lifted { 2 } else { 0 };
    let row = horizon - 9 - lift;
    let band_style = if scene.ring.lifted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    // The diamond circles the band as the ring spins.
    let phase = (((scene.ring.spin / TAU) * 4.0) as usize) % 4;
    let dx = [0, 1, 0, -1][phase];
    put(
        buf,
        inner,
        center + dx,
        row - 1,
        "◆",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    );
    put(buf, inner, center, row, "◯", band_style);
}

/// Bounds-checked write into the widget area. Clips both edges.
fn put(buf: &mut Buffer, area: Rect, col: i32, row: i32, text: &str, style: Style) {
    if row < 0 || row >= i32::from(area.height) || col >= i32::from(area.width) {
        return;
    }

    let (col, text) = if col < 0 {
        let mut chars = text.chars();
        for _ in 0..(-col) as usize {
            if chars.next().is_none() {
                return;
            }
        }
        (0usize, chars.as_str())
    } else {
        (col as usize, text)
    };
    if text.is_empty() {
        return;
    }

    let x = area.x + col as u16;
    let y = area.y + row as u16;
    let max_width = (area.width as usize).saturating_sub(col);
    buf.set_stringn(x, y, text, max_width, style);
}

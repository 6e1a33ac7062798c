use ratatui::prelude::*;
use ratatui::widgets::*;

use hanami_story::EntryFlag;

use crate::app::App;
use crate::widgets::SceneWidget;

pub fn render_story_view(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // The scene border picks up the backdrop treatment of special moments.
    let scene_block = Block::default()
        .title(" Nobita ♥ Shizuka ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(flag_color(app.scene.backdrop, Color::Magenta)));
    frame.render_widget(SceneWidget::new(&app.scene).block(scene_block), chunks[0]);

    render_message_box(frame, chunks[1], app);
    render_progress(frame, chunks[2], app);
    render_status(frame, chunks[3], app);
}

fn flag_color(flag: EntryFlag, plain: Color) -> Color {
    match flag {
        EntryFlag::None => plain,
        EntryFlag::Proposal => Color::Yellow,
        EntryFlag::Acceptance => Color::LightYellow,
        EntryFlag::Finale => Color::Red,
    }
}

/// The dialogue panel. Special moments restyle the box the way the original
/// scene swapped its background gradient.
fn render_message_box(frame: &mut Frame, area: Rect, app: &App) {
    let entry = app.playback.current();
    let text = match entry.flag {
        EntryFlag::None => format!("{}: {}", entry.speaker, entry.text),
        EntryFlag::Proposal => format!("💍 {}: {} 💍", entry.speaker, entry.text),
        EntryFlag::Acceptance => format!("✨✨ {}: {} ✨✨", entry.speaker, entry.text),
        EntryFlag::Finale => format!("❤️❤️❤️ {} ❤️❤️❤️", entry.text),
    };
    let border_color = flag_color(entry.flag, Color::LightMagenta);

    let width = (area.width.saturating_sub(4) as usize).max(16);
    let lines: Vec<Line> = textwrap::wrap(&text, width)
        .into_iter()
        .map(|cow| Line::from(cow.into_owned()))
        .collect();

    let message = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" {} ", entry.chapter_label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(message, area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let entry = app.playback.current();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::LightMagenta).bg(Color::DarkGray))
        .ratio(f64::from(entry.progress) / 100.0)
        .label(format!("{}%", entry.progress));
    frame.render_widget(gauge, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (auto_text, auto_color) = if app.playback.auto_play() {
        ("Auto-Play: ON", Color::LightGreen)
    } else {
        ("Auto-Play: OFF", Color::LightRed)
    };

    let line = Line::from(vec![
        Span::styled(auto_text, Style::default().fg(auto_color).bold()),
        Span::styled(
            "  [Space] next  [A] auto-play  [R] reset view  [←→↑↓] pan  [1/2] view  [Q] quit",
            Style::default().fg(Color::Gray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

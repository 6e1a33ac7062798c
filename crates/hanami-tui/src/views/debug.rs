use ratatui::prelude::*;
use ratatui::widgets::*;

use hanami_events::EventSource;

use crate::app::App;

/// Timestamped story-event log, latest entries kept in view.
pub fn render_debug_view(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // header + borders
    let visible = area.height.saturating_sub(3) as usize;
    let start = app.log.len().saturating_sub(visible);

    let rows: Vec<Row> = app
        .log
        .iter()
        .skip(start)
        .map(|entry| {
            let color = match entry.source {
                EventSource::UserInput => Color::Cyan,
                EventSource::Timer => Color::Yellow,
                EventSource::System => Color::Gray,
            };
            Row::new(vec![
                entry.timestamp.format("%H:%M:%S%.3f").to_string(),
                entry.source.to_string(),
                entry.description.clone(),
            ])
            .style(Style::default().fg(color))
        })
        .collect();

    let header =
        Row::new(vec!["Time", "Source", "Event"]).style(Style::default().fg(Color::Yellow).bold());

    let table = Table::new(
        rows,
        [
            Constraint::Max(14),
            Constraint::Max(10),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!("Events [Total: {}]", app.log.len()))
            .borders(Borders::ALL),
    )
    .style(Style::default().fg(Color::White));

    frame.render_widget(table, area);
}

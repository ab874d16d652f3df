// Single post page rendering.

use ratatui::{prelude::*, widgets::*};

use crate::state::PostView;
use crate::ui::list::post_lines;

pub fn render_post(frame: &mut Frame, view: &PostView, title: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Post body
            Constraint::Length(4), // Summary
        ])
        .split(area);

    let width = chunks[0].width.saturating_sub(2) as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            view.node.href.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];
    let selected = (!view.node.tags.is_empty()).then_some(view.tag_index);
    lines.extend(post_lines(&view.node, width, selected));

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[0]);

    let summary = Paragraph::new(view.summary.clone())
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Summary "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, chunks[1]);
}

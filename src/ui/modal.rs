// Modal UI components.
// Search dialog drawn on top of the current view.

use ratatui::{prelude::*, widgets::*};

/// Draw the search modal: a query line, an error line, and key hints.
pub fn draw_search_modal(frame: &mut Frame, query: &str, error: Option<&str>) {
    let area = frame.area();

    // Create centered modal
    let modal_width = 60u16.min(area.width);
    let modal_height = 7u16.min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(2), // Error
            Constraint::Min(1),    // Instructions
        ])
        .split(modal_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search ");

    let input_line = Line::from(vec![
        Span::styled("Post # or tag: ", Style::default().fg(Color::DarkGray)),
        Span::raw(query),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(input_line).block(input_block), chunks[0]);

    if let Some(error) = error {
        let error_widget = Paragraph::new(error)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).bg(Color::Black));
        frame.render_widget(error_widget, chunks[1]);
    }

    let instructions = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" search  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" cancel"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().bg(Color::Black));
    frame.render_widget(instructions, chunks[2]);
}

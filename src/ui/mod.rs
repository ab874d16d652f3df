// UI module for rendering the TUI.
// Contains widgets for tabs, breadcrumbs, the feed list, post pages, and the console.

mod breadcrumb;
mod list;
mod modal;
mod post;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::{ConsoleLevel, Screen};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Length(2), // Breadcrumb
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Feed => breadcrumb::draw_breadcrumb(frame, &app.nav.breadcrumbs(), chunks[1]),
        Tab::Console => {
            let block = Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray));
            frame.render_widget(block, chunks[1]);
        }
    }

    match app.active_tab {
        Tab::Feed => draw_feed_tab(frame, app, chunks[2]),
        Tab::Console => draw_console_tab(frame, app, chunks[2]),
    }

    draw_status_bar(frame, app, chunks[3]);

    // Search modal (rendered last, on top of everything)
    if app.search.active {
        modal::draw_search_modal(frame, &app.search.query, app.search.error.as_deref());
    }
}

/// Draw the current screen of the Feed tab.
fn draw_feed_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = app.nav.current().level.title();
    match &mut app.nav.current_mut().screen {
        Screen::Feed(feed) => list::render_feed(frame, feed, &title, area),
        Screen::Post(view) => post::render_post(frame, view, &title, area),
    }
}

/// Draw the Console tab with the activity log.
fn draw_console_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .console
        .messages
        .iter()
        .map(|msg| {
            let (label, color) = match msg.level {
                ConsoleLevel::Info => ("INFO ", Color::Blue),
                ConsoleLevel::Warn => ("WARN ", Color::Yellow),
                ConsoleLevel::Error => ("ERROR", Color::Red),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    msg.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(label, Style::default().fg(color)),
                Span::raw(" "),
                Span::raw(msg.message.clone()),
            ]))
        })
        .collect();

    if items.is_empty() {
        list::render_empty(frame, area, "No messages");
        return;
    }

    let list_widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Console "))
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list_widget, area, &mut app.console.list_state);
}

/// Draw the key hints for the current screen.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match (&app.active_tab, &app.nav.current().screen) {
        (Tab::Console, _) => " ↑↓ scroll  Tab feed  q quit",
        (Tab::Feed, Screen::Feed(_)) => " ↑↓ scroll  Enter open  / search  Esc back  q quit",
        (Tab::Feed, Screen::Post(_)) => " ←→ tag  Enter open tag  / search  Esc back  q quit",
    };
    let status = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

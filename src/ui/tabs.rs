// Top bar: one tab per screen group.
// The Feed tab carries the current feed's position, the Console tab its unread errors.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::state::Screen;

const TABS: [Tab; 2] = [Tab::Feed, Tab::Console];

/// Label for the Feed tab: what is shown and how far it has loaded.
fn feed_label(app: &App) -> String {
    let entry = app.nav.current();
    let mut label = Tab::Feed.title().to_string();
    if app.nav.can_go_back() {
        label.push_str(" · ");
        label.push_str(&entry.level.to_breadcrumb().label);
    }
    match &entry.screen {
        Screen::Feed(feed) if feed.loader.is_populated() => {
            format!("{} {}/{}", label, feed.rendered(), feed.loader.len())
        }
        Screen::Feed(_) => format!("{} …", label),
        Screen::Post(_) => label,
    }
}

fn console_label(app: &App) -> String {
    match app.console_unread {
        0 => Tab::Console.title().to_string(),
        n => format!("{} ({})", Tab::Console.title(), n),
    }
}

pub fn tab_label(app: &App, tab: Tab) -> String {
    match tab {
        Tab::Feed => feed_label(app),
        Tab::Console => console_label(app),
    }
}

fn tab_style(app: &App, tab: Tab) -> Style {
    let loading = matches!(
        &app.nav.current().screen,
        Screen::Feed(feed) if feed.loader.is_loading()
    );
    match tab {
        _ if tab == app.active_tab => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Tab::Console if app.console_unread > 0 => Style::default().fg(Color::Red),
        Tab::Feed if loading => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TABS
        .iter()
        .map(|&tab| Line::from(Span::styled(tab_label(app, tab), tab_style(app, tab))))
        .collect();
    let selected = TABS.iter().position(|&t| t == app.active_tab).unwrap_or(0);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " factfeed ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(
        Tabs::new(titles)
            .block(block)
            .select(selected)
            .divider(Span::styled(" │ ", Style::default().fg(Color::DarkGray))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::TempDir;

    use crate::cache::MemoryStore;
    use crate::config::Config;
    use crate::context::SiteContext;
    use crate::source::FileSource;

    #[tokio::test]
    async fn test_labels_follow_feed_and_console() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        let posts: Vec<String> = (1..=25)
            .map(|i| format!(r#"{{"id": {0}, "title": "Fact #{0}", "text": "t"}}"#, i))
            .collect();
        std::fs::write(&path, format!("[{}]", posts.join(","))).unwrap();

        let mut app = App::new(SiteContext::new(
            Arc::new(FileSource::new(path)),
            Arc::new(MemoryStore::new()),
            Config::default(),
        ));
        assert_eq!(tab_label(&app, Tab::Feed), "Feed …");
        assert_eq!(tab_label(&app, Tab::Console), "Console");

        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                app.drain_feed_events();
                if tab_label(&app, Tab::Feed) != "Feed …" {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(tab_label(&app, Tab::Feed), "Feed 20/25");

        app.console_unread = 2;
        assert_eq!(tab_label(&app, Tab::Console), "Console (2)");
    }
}

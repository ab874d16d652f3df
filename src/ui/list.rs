// Feed list rendering.
// Each post is a multi-line list item: heading, wrapped body, notes, and tags.

use ratatui::{prelude::*, widgets::*};

use crate::html::Segment;
use crate::render::{PostNode, TagLink};
use crate::state::FeedView;

/// Render a loading message.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

fn segment_style(segment: &Segment, base: Style) -> Style {
    if segment.highlighted {
        base.fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

/// Word-wrap styled segments into lines no wider than `width` columns.
/// Highlighted runs keep their style across line breaks.
pub fn wrap_segments(segments: &[Segment], width: usize, base: Style) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for segment in segments {
        let style = segment_style(segment, base);
        for (i, paragraph) in segment.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            for piece in paragraph.split_inclusive(' ') {
                let len = piece.chars().count();
                if used > 0 && used + len > width {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    used = 0;
                }
                current.push(Span::styled(piece.to_string(), style));
                used += len;
            }
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn tag_spans(tags: &[TagLink], selected: Option<usize>) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled("Tags: ", Style::default().fg(Color::DarkGray))];
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if selected == Some(i) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if tag.active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!("[{}]", tag.label), style));
    }
    spans
}

/// Heading line for a post: `#id title`.
pub fn heading_line(node: &PostNode) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("#{}", node.id),
        Style::default().fg(Color::Magenta),
    )];
    if let Some(title) = &node.title {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Build the lines of one post. `selected_tag` marks a tag picked on a post page.
pub fn post_lines(node: &PostNode, width: usize, selected_tag: Option<usize>) -> Vec<Line<'static>> {
    let mut lines = vec![heading_line(node)];
    if let Some(image) = &node.image {
        lines.push(Line::from(Span::styled(
            format!("🖼  {}", image.src),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.extend(wrap_segments(&node.text, width, Style::default()));
    if !node.notes.is_empty() {
        lines.extend(wrap_segments(
            &node.notes,
            width,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    if !node.tags.is_empty() {
        lines.push(Line::from(tag_spans(&node.tags, selected_tag)));
    }
    lines
}

/// Render a feed screen.
pub fn render_feed(frame: &mut Frame, feed: &mut FeedView, title: &str, area: Rect) {
    // Borders and highlight symbol
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem<'static>> = feed.loader.with_target(|blogroll| {
        blogroll
            .nodes()
            .iter()
            .map(|node| {
                let mut lines = post_lines(node, width, None);
                lines.push(Line::default());
                ListItem::new(lines)
            })
            .collect()
    });

    if items.is_empty() {
        if let Some(error) = &feed.last_error {
            render_error(frame, area, error);
        } else if !feed.loader.is_populated() || feed.loader.is_loading() {
            render_loading(frame, area, "Loading posts");
        } else {
            render_empty(frame, area, "No posts found for this tag.");
        }
        return;
    }

    let block_title = format!(
        " {} [{}/{}] ",
        title,
        items.len(),
        feed.loader.len()
    );
    let list_widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(block_title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list_widget, area, &mut feed.list_state);
}

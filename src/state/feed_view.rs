// Feed screen state.
// Owns one feed loader, the list selection, and the debounced scroll check.

use std::time::Instant;

use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;

use crate::feed::{
    BatchOutcome, FeedLoader, ScrollDebounce, Viewport, is_near_bottom,
};
use crate::render::{Blogroll, PostNode};

/// Completion report from a spawned batch load.
#[derive(Debug)]
pub struct FeedEvent {
    pub feed_id: u64,
    pub result: Result<BatchOutcome, String>,
}

pub struct FeedView {
    pub id: u64,
    pub loader: FeedLoader<Blogroll>,
    pub list_state: ListState,
    /// Last foreground load error, shown while nothing is rendered.
    pub last_error: Option<String>,
    debounce: ScrollDebounce,
    threshold: usize,
}

impl FeedView {
    pub fn new(
        id: u64,
        loader: FeedLoader<Blogroll>,
        debounce: ScrollDebounce,
        threshold: usize,
    ) -> Self {
        Self {
            id,
            loader,
            list_state: ListState::default(),
            last_error: None,
            debounce,
            threshold,
        }
    }

    /// Start loading the next batch in the background.
    pub fn request_batch(&self, events: &UnboundedSender<FeedEvent>) {
        let loader = self.loader.clone();
        let events = events.clone();
        let feed_id = self.id;
        tokio::spawn(async move {
            let result = loader.load_next_batch().await.map_err(|e| e.to_string());
            // Receiver is gone when the app is shutting down
            let _ = events.send(FeedEvent { feed_id, result });
        });
    }

    /// Number of rendered posts.
    pub fn rendered(&self) -> usize {
        self.loader.with_target(|b| b.len())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            offset: self.list_state.selected().unwrap_or(0),
            visible: 1,
            content: self.rendered(),
        }
    }

    /// Run the scroll check if one is due; loads when near the bottom.
    /// Returns whether a load was requested.
    pub fn tick(&mut self, now: Instant, events: &UnboundedSender<FeedEvent>) -> bool {
        if !self.debounce.poll(now) || !self.loader.is_attached() {
            return false;
        }
        if is_near_bottom(self.viewport(), self.threshold) {
            self.request_batch(events);
            true
        } else {
            false
        }
    }

    /// Apply a completed load.
    pub fn on_event(&mut self, result: &Result<BatchOutcome, String>) {
        match result {
            Ok(BatchOutcome::Rendered(_)) => {
                self.last_error = None;
                if self.list_state.selected().is_none() {
                    self.list_state.select(Some(0));
                }
            }
            Ok(_) => {}
            Err(e) => self.last_error = Some(e.clone()),
        }
    }

    /// Select the next post.
    pub fn select_next(&mut self, now: Instant) {
        let len = self.rendered();
        if len > 0 {
            let i = match self.list_state.selected() {
                Some(i) if i >= len - 1 => i,
                Some(i) => i + 1,
                None => 0,
            };
            self.list_state.select(Some(i));
        }
        self.debounce.on_scroll(now);
    }

    /// Select the previous post.
    pub fn select_prev(&mut self, now: Instant) {
        if self.rendered() > 0 {
            let i = match self.list_state.selected() {
                Some(i) => i.saturating_sub(1),
                None => 0,
            };
            self.list_state.select(Some(i));
        }
        self.debounce.on_scroll(now);
    }

    pub fn selected_node(&self) -> Option<PostNode> {
        let index = self.list_state.selected()?;
        self.loader.with_target(|b| b.nodes().get(index).cloned())
    }
}

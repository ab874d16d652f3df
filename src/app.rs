// App state and main event loop.
// Manages tabs, the screen stack, search input, and feed load events.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::context::SiteContext;
use crate::feed::{BatchOutcome, FeedFilter, ScrollDebounce};
use crate::render::{PostNode, RenderOptions, post_node};
use crate::site::{self, NO_MATCH_MESSAGE, SearchResolution};
use crate::state::{
    ConsoleState, Entry, FeedEvent, FeedView, NavigationStack, PostView, Screen, ViewLevel,
};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Feed,
    Console,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Feed => "Feed",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Feed => Tab::Console,
            Tab::Console => Tab::Feed,
        }
    }
}

/// Search bar input.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub active: bool,
    pub query: String,
    pub error: Option<String>,
}

enum Open {
    Post(PostNode),
    Tag(String),
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    /// Feed tab screens.
    pub nav: NavigationStack,
    pub console: ConsoleState,
    /// Number of unread console errors (for badge).
    pub console_unread: usize,
    pub search: SearchInput,
    /// Whether the app should exit.
    pub should_quit: bool,
    context: SiteContext,
    events_tx: UnboundedSender<FeedEvent>,
    events_rx: UnboundedReceiver<FeedEvent>,
    next_feed_id: u64,
}

impl App {
    /// Create the app with the main feed as root and start its first batch.
    /// Must be called inside a tokio runtime.
    pub fn new(context: SiteContext) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let root = Self::feed_view(&context, 0, FeedFilter::All);
        root.request_batch(&events_tx);

        let mut console = ConsoleState::new();
        console.log_info(format!("Loading posts from {}", context.source.describe()));

        Self {
            active_tab: Tab::default(),
            nav: NavigationStack::new(Entry {
                level: ViewLevel::Feed,
                screen: Screen::Feed(root),
            }),
            console,
            console_unread: 0,
            search: SearchInput::default(),
            should_quit: false,
            context,
            events_tx,
            events_rx,
            next_feed_id: 1,
        }
    }

    fn feed_view(context: &SiteContext, id: u64, filter: FeedFilter) -> FeedView {
        FeedView::new(
            id,
            context.loader(filter),
            ScrollDebounce::new(context.config.debounce()),
            context.config.scroll_threshold,
        )
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.drain_feed_events();
            self.tick(Instant::now());
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Apply completed loads from spawned tasks.
    pub fn drain_feed_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_feed_event(event);
        }
    }

    fn apply_feed_event(&mut self, event: FeedEvent) {
        let Some(feed) = self.nav.feed_mut(event.feed_id) else {
            // Screen was closed while loading
            return;
        };
        feed.on_event(&event.result);

        match event.result {
            Ok(BatchOutcome::Rendered(n)) => {
                tracing::debug!(feed = event.feed_id, rendered = n, "batch applied");
            }
            Ok(BatchOutcome::Exhausted) => {
                self.console.log_info("Reached the end of the feed");
            }
            Ok(BatchOutcome::Busy) => {}
            Err(e) => {
                self.console.log_error(format!("Error loading posts: {}", e));
                if self.active_tab != Tab::Console {
                    self.console_unread += 1;
                }
            }
        }
    }

    /// Run the due scroll check on the visible feed.
    pub fn tick(&mut self, now: Instant) {
        if let Screen::Feed(feed) = &mut self.nav.current_mut().screen {
            feed.tick(now, &self.events_tx);
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.search.active {
            self.handle_search_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.active_tab = self.active_tab.next();
                self.clear_console_badge_if_viewing();
            }
            _ if self.active_tab == Tab::Console => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.console.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.console.select_next(),
                _ => {}
            },
            KeyCode::Char('/') => {
                self.search = SearchInput {
                    active: true,
                    ..SearchInput::default()
                };
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.nav.pop();
            }
            KeyCode::Enter => self.open_selected(),
            code => match &mut self.nav.current_mut().screen {
                Screen::Feed(feed) => match code {
                    KeyCode::Up | KeyCode::Char('k') => feed.select_prev(now),
                    KeyCode::Down | KeyCode::Char('j') => feed.select_next(now),
                    _ => {}
                },
                Screen::Post(post) => match code {
                    KeyCode::Left | KeyCode::Char('h') => post.prev_tag(),
                    KeyCode::Right | KeyCode::Char('l') => post.next_tag(),
                    _ => {}
                },
            },
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.search = SearchInput::default(),
            KeyCode::Enter => self.submit_search(),
            KeyCode::Backspace => {
                self.search.query.pop();
                self.search.error = None;
            }
            KeyCode::Char(c) => {
                self.search.query.push(c);
                self.search.error = None;
            }
            _ => {}
        }
    }

    /// Resolve the search query against the main feed's posts.
    pub fn submit_search(&mut self) {
        let Screen::Feed(root) = &self.nav.root().screen else {
            return;
        };
        if !root.loader.is_populated() {
            self.search.error = Some("Posts are still loading".to_string());
            return;
        }

        let posts = root.loader.posts();
        match site::resolve_search(&posts, &self.search.query) {
            SearchResolution::Empty => {}
            SearchResolution::Post(id) => {
                if let Some(post) = site::find_post(&posts, &id.to_string()) {
                    let node = post_node(post, &RenderOptions::default());
                    self.search = SearchInput::default();
                    self.push_post(PostView::new(node));
                }
            }
            SearchResolution::Tags(term) => {
                self.search = SearchInput::default();
                self.push_feed(
                    ViewLevel::Search { term: term.clone() },
                    FeedFilter::TagSearch(term),
                );
            }
            SearchResolution::NoMatch => {
                self.search.error = Some(NO_MATCH_MESSAGE.to_string());
            }
        }
    }

    /// Enter: open the selected post, or the selected tag on a post page.
    fn open_selected(&mut self) {
        let target = match &self.nav.current().screen {
            Screen::Feed(feed) => feed.selected_node().map(Open::Post),
            Screen::Post(post) => post.selected_tag().map(|tag| Open::Tag(tag.to_string())),
        };

        match target {
            Some(Open::Post(node)) => self.push_post(PostView::new(node)),
            Some(Open::Tag(tag)) => {
                self.push_feed(ViewLevel::Tag { tag: tag.clone() }, FeedFilter::Tag(tag))
            }
            None => {}
        }
    }

    fn push_post(&mut self, view: PostView) {
        self.nav.push(Entry {
            level: ViewLevel::Post {
                id: view.node.id.clone(),
            },
            screen: Screen::Post(view),
        });
    }

    /// Push a new feed screen and load its first batch eagerly.
    fn push_feed(&mut self, level: ViewLevel, filter: FeedFilter) {
        let id = self.next_feed_id;
        self.next_feed_id += 1;

        let view = Self::feed_view(&self.context, id, filter);
        view.request_batch(&self.events_tx);
        self.nav.push(Entry {
            level,
            screen: Screen::Feed(view),
        });
    }

    /// Clear console badge when viewing console tab.
    fn clear_console_badge_if_viewing(&mut self) {
        if self.active_tab == Tab::Console {
            self.console_unread = 0;
        }
    }
}

// Navigation state management.
// Handles the screen stack and breadcrumb trail for the Feed tab.

use crate::post::PostId;

use super::feed_view::FeedView;
use super::post_view::PostView;

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
    /// The view level this node represents.
    pub level: ViewLevel,
}

/// The current view level in the navigation hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLevel {
    /// Top level: the main feed
    Feed,
    /// Posts with one tag
    Tag { tag: String },
    /// Posts whose tags contain a search term
    Search { term: String },
    /// A single post
    Post { id: PostId },
}

impl ViewLevel {
    /// Get the display title for this view level.
    pub fn title(&self) -> String {
        match self {
            ViewLevel::Feed => "Facts".to_string(),
            ViewLevel::Tag { tag } => format!("Tags for {}", tag),
            ViewLevel::Search { term } => format!("Tags for {}", term),
            ViewLevel::Post { id } => format!("Fact showing #{}", id),
        }
    }

    /// Create a breadcrumb node for this view level.
    pub fn to_breadcrumb(&self) -> BreadcrumbNode {
        let label = match self {
            ViewLevel::Feed => "Feed".to_string(),
            ViewLevel::Tag { tag } => format!("Tag: {}", tag),
            ViewLevel::Search { term } => format!("Search: {}", term),
            ViewLevel::Post { id } => format!("Post #{}", id),
        };
        BreadcrumbNode {
            label,
            level: self.clone(),
        }
    }
}

/// What a stack entry shows.
pub enum Screen {
    Feed(FeedView),
    Post(PostView),
}

pub struct Entry {
    pub level: ViewLevel,
    pub screen: Screen,
}

/// Navigation stack for the Feed tab.
pub struct NavigationStack {
    /// Stack of entries (bottom = root, top = current)
    stack: Vec<Entry>,
}

impl NavigationStack {
    /// Create a new navigation stack starting at the given entry.
    pub fn new(root: Entry) -> Self {
        Self { stack: vec![root] }
    }

    /// Get the current entry.
    pub fn current(&self) -> &Entry {
        self.stack.last().expect("Stack should never be empty")
    }

    pub fn current_mut(&mut self) -> &mut Entry {
        self.stack.last_mut().expect("Stack should never be empty")
    }

    /// The root entry (main feed).
    pub fn root(&self) -> &Entry {
        &self.stack[0]
    }

    /// Push a new entry onto the stack (drill down).
    pub fn push(&mut self, entry: Entry) {
        self.stack.push(entry);
    }

    /// Pop the current entry (go back). Returns false if at root.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Check if we can go back (not at root).
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Get the breadcrumb trail.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        self.stack
            .iter()
            .map(|entry| entry.level.to_breadcrumb())
            .collect()
    }

    /// Get the depth of the navigation stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Find the feed screen with this id anywhere in the stack.
    pub fn feed_mut(&mut self, feed_id: u64) -> Option<&mut FeedView> {
        self.stack.iter_mut().find_map(|entry| match &mut entry.screen {
            Screen::Feed(feed) if feed.id == feed_id => Some(feed),
            _ => None,
        })
    }
}

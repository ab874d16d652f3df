// Feed state owned by one loader instance.
// Display order, pagination cursor, and the re-entrancy flag.

use crate::post::Post;
use crate::render::RenderOptions;

/// Which posts a feed instance shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedFilter {
    /// Every post.
    #[default]
    All,
    /// Posts carrying exactly this tag.
    Tag(String),
    /// Posts with any tag containing this term, case-insensitively.
    TagSearch(String),
}

impl FeedFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            FeedFilter::All => true,
            FeedFilter::Tag(tag) => post.has_tag(tag),
            FeedFilter::TagSearch(term) => {
                let term = term.to_lowercase();
                post.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
        }
    }

    /// Tag feeds highlight their tag; search feeds only filter.
    pub fn render_options(&self) -> RenderOptions {
        match self {
            FeedFilter::Tag(tag) => RenderOptions {
                highlight: Some(tag.clone()),
                active_tag: Some(tag.clone()),
            },
            FeedFilter::All | FeedFilter::TagSearch(_) => RenderOptions::default(),
        }
    }
}

/// Mutable state of a feed.
#[derive(Debug, Clone)]
pub struct FeedState {
    /// Posts in display order (most recent first).
    ordered_posts: Vec<Post>,
    /// Whether `ordered_posts` has been sourced yet.
    populated: bool,
    /// Index of the next unrendered post.
    cursor: usize,
    /// A population or render step is in flight.
    pub loading: bool,
    /// Scroll-triggered loading is still wanted.
    pub attached: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            ordered_posts: Vec::new(),
            populated: false,
            cursor: 0,
            loading: false,
            attached: true,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.ordered_posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_posts.is_empty()
    }

    pub fn posts(&self) -> &[Post] {
        &self.ordered_posts
    }

    /// First population: posts arrive in store order and are shown newest first.
    pub fn populate(&mut self, store_order: Vec<Post>, filter: &FeedFilter) {
        self.ordered_posts = display_order(store_order, filter);
        self.populated = true;
        self.cursor = 0;
    }

    /// Swap in a refreshed list for later batches. Already rendered posts stay as they are.
    pub fn replace(&mut self, store_order: Vec<Post>, filter: &FeedFilter) {
        self.ordered_posts = display_order(store_order, filter);
        self.populated = true;
        if self.cursor < self.ordered_posts.len() {
            self.attached = true;
        }
    }

    /// Next window of at most `size` posts from the cursor.
    pub fn window(&self, size: usize) -> &[Post] {
        let start = self.cursor.min(self.ordered_posts.len());
        let end = start.saturating_add(size).min(self.ordered_posts.len());
        &self.ordered_posts[start..end]
    }

    pub fn advance(&mut self, count: usize) {
        self.cursor += count;
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.ordered_posts.len()
    }
}

fn display_order(store_order: Vec<Post>, filter: &FeedFilter) -> Vec<Post> {
    store_order
        .into_iter()
        .rev()
        .filter(|post| filter.matches(post))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostId;

    fn post(id: i64, tags: &[&str]) -> Post {
        Post {
            id: PostId::Number(id),
            title: format!("Fact #{}", id),
            text: String::new(),
            notes: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
        }
    }

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().filter_map(|p| p.id.as_number()).collect()
    }

    #[test]
    fn test_populate_reverses() {
        let mut state = FeedState::new();
        assert!(!state.is_populated());

        state.populate(vec![post(1, &[]), post(2, &[]), post(3, &[])], &FeedFilter::All);
        assert!(state.is_populated());
        assert_eq!(ids(state.posts()), vec![3, 2, 1]);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_window_and_advance() {
        let mut state = FeedState::new();
        state.populate((1..=5).map(|i| post(i, &[])).collect(), &FeedFilter::All);

        assert_eq!(ids(state.window(2)), vec![5, 4]);
        state.advance(2);
        assert_eq!(ids(state.window(2)), vec![3, 2]);
        state.advance(2);
        assert_eq!(ids(state.window(2)), vec![1]);
        state.advance(1);
        assert!(state.window(2).is_empty());
        assert!(state.is_exhausted());
    }

    #[test]
    fn test_replace_keeps_cursor_and_reattaches() {
        let mut state = FeedState::new();
        state.populate(vec![post(1, &[])], &FeedFilter::All);
        state.advance(1);
        state.attached = false;

        state.replace(vec![post(1, &[]), post(2, &[])], &FeedFilter::All);
        assert_eq!(state.cursor(), 1);
        assert!(state.attached);
        assert_eq!(ids(state.window(20)), vec![1]);
    }

    #[test]
    fn test_filters() {
        let posts = vec![
            post(1, &["Blade"]),
            post(2, &["Passenger 57"]),
            post(3, &["blade runner", "tax"]),
        ];

        let mut tagged = FeedState::new();
        tagged.populate(posts.clone(), &FeedFilter::Tag("Blade".to_string()));
        assert_eq!(ids(tagged.posts()), vec![1]);

        let mut searched = FeedState::new();
        searched.populate(posts, &FeedFilter::TagSearch("BLADE".to_string()));
        assert_eq!(ids(searched.posts()), vec![3, 1]);
    }

    #[test]
    fn test_tag_filter_render_options() {
        let options = FeedFilter::Tag("Blade".to_string()).render_options();
        assert_eq!(options.highlight.as_deref(), Some("Blade"));
        assert!(FeedFilter::All.render_options().highlight.is_none());
    }
}

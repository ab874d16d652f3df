// Single post screen state.

use crate::html;
use crate::render::PostNode;

/// Characters of body text used for the summary line.
const EXCERPT_CHARS: usize = 155;

pub struct PostView {
    pub node: PostNode,
    pub summary: String,
    /// Highlighted tag, for opening its feed.
    pub tag_index: usize,
}

impl PostView {
    pub fn new(node: PostNode) -> Self {
        let summary = html::excerpt(&node.text_string(), EXCERPT_CHARS);
        Self {
            node,
            summary,
            tag_index: 0,
        }
    }

    pub fn next_tag(&mut self) {
        if self.tag_index + 1 < self.node.tags.len() {
            self.tag_index += 1;
        }
    }

    pub fn prev_tag(&mut self) {
        self.tag_index = self.tag_index.saturating_sub(1);
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.node
            .tags
            .get(self.tag_index)
            .map(|tag| tag.label.as_str())
    }
}

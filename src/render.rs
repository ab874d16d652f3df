// Post to node mapping and render targets.
// A PostNode is everything a view needs to draw one post, with no HTML left.

use crate::html::{self, Segment};
use crate::post::{Post, PostId};

/// Link to a tag feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLink {
    pub label: String,
    pub href: String,
    /// The tag this feed is filtered by.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNode {
    pub src: String,
    pub alt: String,
}

/// Renderable description of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostNode {
    pub id: PostId,
    pub href: String,
    pub title: Option<String>,
    pub image: Option<ImageNode>,
    pub text: Vec<Segment>,
    pub notes: Vec<Segment>,
    pub tags: Vec<TagLink>,
}

impl PostNode {
    /// Text body flattened back to one string.
    pub fn text_string(&self) -> String {
        self.text.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn notes_string(&self) -> String {
        self.notes.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Options that vary per feed instance.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Term to highlight in text and notes.
    pub highlight: Option<String>,
    /// Tag to mark active in the tag list.
    pub active_tag: Option<String>,
}

/// Relative link to a tag page.
pub fn tag_href(tag: &str) -> String {
    format!("tag.html?tag={}", encode_component(tag))
}

/// Map a post to its node.
pub fn post_node(post: &Post, options: &RenderOptions) -> PostNode {
    let highlight = options.highlight.as_deref();
    let title = (!post.title.is_empty()).then(|| post.title.clone());

    PostNode {
        id: post.id.clone(),
        href: post.href(),
        image: post.image.as_ref().map(|src| ImageNode {
            src: src.clone(),
            alt: post.title.clone(),
        }),
        title,
        text: html::highlight(&html::plain_text(&post.text), highlight),
        notes: html::highlight(&html::plain_text(&post.notes), highlight),
        tags: post
            .tags
            .iter()
            .map(|tag| TagLink {
                label: tag.clone(),
                href: tag_href(tag),
                active: options.active_tag.as_deref() == Some(tag.as_str()),
            })
            .collect(),
    }
}

/// Container that accepts appended post nodes.
pub trait RenderTarget: Send + 'static {
    /// Append a batch, in order, as one operation.
    fn append(&mut self, nodes: Vec<PostNode>);
}

/// Render target that keeps every appended node.
#[derive(Debug, Clone, Default)]
pub struct Blogroll {
    nodes: Vec<PostNode>,
    appends: usize,
}

impl Blogroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[PostNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of batches appended so far.
    pub fn appends(&self) -> usize {
        self.appends
    }
}

impl RenderTarget for Blogroll {
    fn append(&mut self, mut nodes: Vec<PostNode>) {
        self.nodes.append(&mut nodes);
        self.appends += 1;
    }
}

/// Percent-encode a URL component the way browsers' encodeURIComponent does.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post {
            id: PostId::Number(12),
            title: "Fact #12".to_string(),
            text: "<p>Snipes taught <b>Blade</b> to read.</p>".to_string(),
            notes: "Source: blade lore".to_string(),
            tags: vec!["Blade".to_string(), "tax revolt".to_string()],
            image: Some("img/12.jpg".to_string()),
        }
    }

    #[test]
    fn test_post_node() {
        let node = post_node(&sample(), &RenderOptions::default());

        assert_eq!(node.href, "post.html?id=12");
        assert_eq!(node.title.as_deref(), Some("Fact #12"));
        assert_eq!(node.text_string(), "Snipes taught Blade to read.");
        assert_eq!(
            node.image,
            Some(ImageNode {
                src: "img/12.jpg".to_string(),
                alt: "Fact #12".to_string(),
            })
        );
        assert_eq!(node.tags[1].href, "tag.html?tag=tax%20revolt");
        assert!(node.tags.iter().all(|t| !t.active));
    }

    #[test]
    fn test_post_node_without_title() {
        let mut post = sample();
        post.title.clear();
        post.image = None;

        let node = post_node(&post, &RenderOptions::default());
        assert!(node.title.is_none());
        assert!(node.image.is_none());
    }

    #[test]
    fn test_post_node_highlights_tag() {
        let options = RenderOptions {
            highlight: Some("Blade".to_string()),
            active_tag: Some("Blade".to_string()),
        };
        let node = post_node(&sample(), &options);

        assert!(node.text.iter().any(|s| s.highlighted && s.text == "Blade"));
        assert!(node.notes.iter().any(|s| s.highlighted && s.text == "blade"));
        assert!(node.tags[0].active);
        assert!(!node.tags[1].active);
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b&c/d"), "a%20b%26c%2Fd");
        assert_eq!(encode_component("caf\u{e9}"), "caf%C3%A9");
    }

    #[test]
    fn test_blogroll_appends_in_order() {
        let mut blogroll = Blogroll::new();
        let first = post_node(&sample(), &RenderOptions::default());
        let mut second = first.clone();
        second.id = PostId::Number(11);

        blogroll.append(vec![first.clone()]);
        blogroll.append(vec![second.clone()]);
        assert_eq!(blogroll.nodes(), &[first, second]);
        assert_eq!(blogroll.appends(), 2);
    }
}

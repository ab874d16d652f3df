// HTML body handling for terminal display.
// Converts post HTML to plain text and splits text around highlighted terms.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|[a-zA-Z]+);").expect("valid entity regex"));

/// A run of text, optionally highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// Strip tags and decode the entities the site actually uses.
/// Unknown entities are left as written.
pub fn plain_text(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, "");
    ENTITY_RE
        .replace_all(&without_tags, |caps: &regex::Captures| {
            let entity = &caps[1];
            match entity {
                "shy" => String::new(),
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "nbsp" => " ".to_string(),
                "ndash" => "\u{2013}".to_string(),
                "mdash" => "\u{2014}".to_string(),
                "hellip" => "\u{2026}".to_string(),
                _ => entity
                    .strip_prefix('#')
                    .and_then(|n| n.parse::<u32>().ok())
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string()),
            }
        })
        .into_owned()
}

/// First `max_chars` characters of the text, with "..." appended when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Split text into segments, highlighting every case-insensitive match of `term`.
pub fn highlight(text: &str, term: Option<&str>) -> Vec<Segment> {
    let term = match term {
        Some(t) if !t.is_empty() => t,
        _ => return vec![Segment::plain(text)],
    };

    let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(term))) else {
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::plain(&text[last..m.start()]));
        }
        segments.push(Segment::highlighted(m.as_str()));
        last = m.end();
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}

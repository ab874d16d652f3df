// Site-level lookups over the post list.
// Search bar resolution, post lookup, and the posts.json consistency check.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::post::{Post, PostId};

/// Message shown when a search matches nothing.
pub const NO_MATCH_MESSAGE: &str = "Sorry. Please roll again.";

/// Ids of special posts that are not numbered facts.
const SPECIAL_IDS: [&str; 2] = ["alert", "big-book"];

static FACT_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Fact #(\d+)$").expect("valid title regex"));

/// Where a search bar submission leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResolution {
    /// Nothing was typed.
    Empty,
    /// The input is a post id.
    Post(PostId),
    /// Tags contain the (lowercased) term.
    Tags(String),
    NoMatch,
}

/// Resolve search input: a numeric id opens that post, otherwise tags are matched by substring.
pub fn resolve_search(posts: &[Post], input: &str) -> SearchResolution {
    let raw = input.trim();
    if raw.is_empty() {
        return SearchResolution::Empty;
    }

    if raw.chars().all(|c| c.is_ascii_digit()) {
        if let Some(post) = find_post(posts, raw) {
            return SearchResolution::Post(post.id.clone());
        }
    }

    let term = raw.to_lowercase();
    if all_tags(posts)
        .iter()
        .any(|tag| tag.to_lowercase().contains(&term))
    {
        SearchResolution::Tags(term)
    } else {
        SearchResolution::NoMatch
    }
}

/// Find a post by id, comparing ids by their string form.
pub fn find_post<'a>(posts: &'a [Post], id: &str) -> Option<&'a Post> {
    posts.iter().find(|post| post.id.to_string() == id)
}

/// Every distinct tag, sorted.
pub fn all_tags(posts: &[Post]) -> BTreeSet<&str> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().map(String::as_str))
        .collect()
}

/// A problem found by `check_posts`, with the post's index in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckIssue {
    IdNotInteger { index: usize, id: PostId },
    TitleFormat { index: usize, title: String },
    IdTitleMismatch { index: usize, id: i64, title: String },
    Gap { previous: i64, current: i64 },
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckIssue::IdNotInteger { index, id } => {
                write!(f, "Post {}: id is not int: {}", index, id)
            }
            CheckIssue::TitleFormat { index, title } => {
                write!(f, "Post {}: title format error: {}", index, title)
            }
            CheckIssue::IdTitleMismatch { index, id, title } => {
                write!(f, "Post {}: id/title mismatch: id={}, title={}", index, id, title)
            }
            CheckIssue::Gap { previous, current } => write!(
                f,
                "Gap or out-of-order: previous id={}, current id={}",
                previous, current
            ),
        }
    }
}

/// Check that numbered posts are titled `Fact #<id>` and numbered consecutively.
pub fn check_posts(posts: &[Post]) -> Vec<CheckIssue> {
    let mut issues = Vec::new();
    let mut previous: Option<i64> = None;

    for (index, post) in posts.iter().enumerate() {
        if let PostId::Text(slug) = &post.id {
            if SPECIAL_IDS.contains(&slug.as_str()) {
                continue;
            }
        }

        let Some(id) = post.id.as_number() else {
            issues.push(CheckIssue::IdNotInteger {
                index,
                id: post.id.clone(),
            });
            continue;
        };

        let Some(title_num) = FACT_TITLE_RE
            .captures(&post.title)
            .and_then(|caps| caps[1].parse::<i64>().ok())
        else {
            issues.push(CheckIssue::TitleFormat {
                index,
                title: post.title.clone(),
            });
            continue;
        };

        if id != title_num {
            issues.push(CheckIssue::IdTitleMismatch {
                index,
                id,
                title: post.title.clone(),
            });
        }
        if let Some(prev) = previous {
            if prev.checked_add(1) != Some(id) {
                issues.push(CheckIssue::Gap {
                    previous: prev,
                    current: id,
                });
            }
        }
        previous = Some(id);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: PostId, title: &str, tags: &[&str]) -> Post {
        Post {
            id,
            title: title.to_string(),
            text: String::new(),
            notes: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
        }
    }

    fn fact(id: i64, tags: &[&str]) -> Post {
        post(PostId::Number(id), &format!("Fact #{}", id), tags)
    }

    #[test]
    fn test_resolve_search() {
        let posts = vec![fact(1, &["Blade"]), fact(2, &["Tax Revolt"])];

        assert_eq!(resolve_search(&posts, "   "), SearchResolution::Empty);
        assert_eq!(
            resolve_search(&posts, " 2 "),
            SearchResolution::Post(PostId::Number(2))
        );
        assert_eq!(
            resolve_search(&posts, "REVOLT"),
            SearchResolution::Tags("revolt".to_string())
        );
        assert_eq!(resolve_search(&posts, "zzz"), SearchResolution::NoMatch);
    }

    #[test]
    fn test_unknown_number_falls_back_to_tags() {
        let posts = vec![fact(1, &["Passenger 57"])];
        assert_eq!(
            resolve_search(&posts, "57"),
            SearchResolution::Tags("57".to_string())
        );
    }

    #[test]
    fn test_find_post() {
        let posts = vec![
            fact(7, &[]),
            post(PostId::Text("alert".to_string()), "Alert", &[]),
        ];
        assert_eq!(find_post(&posts, "7").map(|p| &p.id), Some(&PostId::Number(7)));
        assert!(find_post(&posts, "alert").is_some());
        assert!(find_post(&posts, "8").is_none());
    }

    #[test]
    fn test_check_clean_file() {
        let posts = vec![
            post(PostId::Text("alert".to_string()), "Heads up", &[]),
            fact(1, &[]),
            fact(2, &[]),
            post(PostId::Text("big-book".to_string()), "Big Book", &[]),
            fact(3, &[]),
        ];
        assert!(check_posts(&posts).is_empty());
    }

    #[test]
    fn test_check_reports_issues() {
        let posts = vec![
            fact(1, &[]),
            post(PostId::Text("oops".to_string()), "Fact #2", &[]),
            post(PostId::Number(2), "Fact 2", &[]),
            post(PostId::Number(3), "Fact #4", &[]),
            fact(5, &[]),
        ];

        let issues = check_posts(&posts);
        assert_eq!(
            issues,
            vec![
                CheckIssue::IdNotInteger {
                    index: 1,
                    id: PostId::Text("oops".to_string()),
                },
                CheckIssue::TitleFormat {
                    index: 2,
                    title: "Fact 2".to_string(),
                },
                CheckIssue::IdTitleMismatch {
                    index: 3,
                    id: 3,
                    title: "Fact #4".to_string(),
                },
                CheckIssue::Gap {
                    previous: 1,
                    current: 3,
                },
                CheckIssue::Gap {
                    previous: 3,
                    current: 5,
                },
            ]
        );
        assert_eq!(
            issues[3].to_string(),
            "Gap or out-of-order: previous id=1, current id=3"
        );
    }

    #[test]
    fn test_check_gap_after_largest_id() {
        let posts = vec![fact(i64::MAX, &[]), fact(1, &[])];
        assert_eq!(
            check_posts(&posts),
            vec![CheckIssue::Gap {
                previous: i64::MAX,
                current: 1,
            }]
        );
    }
}

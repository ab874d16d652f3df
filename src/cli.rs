//! Command-line interface: argument definitions and the headless commands.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::context::SiteContext;
use crate::error::Result;
use crate::feed::{BatchOutcome, FeedFilter, RefreshOutcome};
use crate::html;
use crate::post;
use crate::render::PostNode;
use crate::site;

/// Characters of body text shown per post by `print`.
const PRINT_EXCERPT_CHARS: usize = 155;

/// Terminal reader for a static fact blog
#[derive(Parser, Debug)]
#[command(name = "factfeed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to browse)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FACTFEED_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse the feed interactively
    Browse(SourceArgs),

    /// Print feed batches to stdout
    Print {
        #[command(flatten)]
        source: SourceArgs,

        /// Only posts with this exact tag
        #[arg(long)]
        tag: Option<String>,

        /// Only posts with a tag containing this term
        #[arg(long, conflicts_with = "tag")]
        search: Option<String>,

        /// Number of batches to load
        #[arg(short, long, default_value_t = 1)]
        batches: usize,
    },

    /// Check post ids against their "Fact #N" titles
    Check {
        /// Posts file to check
        #[arg(short, long, default_value = "posts.json")]
        file: PathBuf,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Site URL or local posts file (overrides the configured site)
    #[arg(short, long, env = "FACTFEED_SOURCE")]
    pub source: Option<String>,
}

impl Cli {
    /// The subcommand, with `browse` when none was given.
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Browse(SourceArgs::default()))
    }
}

/// Filter selected by the `print` flags.
pub fn print_filter(tag: Option<String>, search: Option<String>) -> FeedFilter {
    match (tag, search) {
        (Some(tag), _) => FeedFilter::Tag(tag),
        (None, Some(term)) => FeedFilter::TagSearch(term.to_lowercase()),
        (None, None) => FeedFilter::All,
    }
}

/// Plain-text form of one rendered post.
pub fn format_node(node: &PostNode) -> String {
    let mut out = format!("#{}", node.id);
    if let Some(title) = &node.title {
        out.push(' ');
        out.push_str(title);
    }
    out.push('\n');

    let text = html::excerpt(&node.text_string(), PRINT_EXCERPT_CHARS);
    if !text.is_empty() {
        out.push_str("  ");
        out.push_str(&text);
        out.push('\n');
    }
    if !node.tags.is_empty() {
        let tags: Vec<&str> = node.tags.iter().map(|t| t.label.as_str()).collect();
        out.push_str(&format!("  tags: {}\n", tags.join(", ")));
    }
    out
}

/// Load up to `batches` batches and print them, then let the refresh finish.
pub async fn run_print(context: &SiteContext, filter: FeedFilter, batches: usize) -> Result<()> {
    let loader = context.loader(filter);

    for _ in 0..batches {
        match loader.load_next_batch().await? {
            BatchOutcome::Rendered(n) => tracing::debug!(rendered = n, "batch loaded"),
            BatchOutcome::Exhausted | BatchOutcome::Busy => break,
        }
    }

    let nodes = loader.with_target(|blogroll| blogroll.nodes().to_vec());
    if nodes.is_empty() {
        println!("No posts found.");
    }
    for node in &nodes {
        println!("{}", format_node(node));
    }
    println!("[{}/{}]", nodes.len(), loader.len());

    if let Some(RefreshOutcome::Updated { posts }) = loader.wait_for_refresh().await {
        tracing::info!(posts, "cache refreshed from the post store");
    }
    Ok(())
}

/// Check a posts file. Returns whether it is clean.
pub async fn run_check(file: &Path) -> Result<bool> {
    let body = tokio::fs::read_to_string(file).await?;
    let posts = post::parse_posts(&body)?;
    let issues = site::check_posts(&posts);

    if issues.is_empty() {
        println!("✓ All numeric ids and titles match, and are consecutive without gaps.");
        return Ok(true);
    }
    for issue in &issues {
        println!("{}", issue);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{Post, PostId};
    use crate::render::{RenderOptions, post_node};
    use tempfile::TempDir;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::try_parse_from(["factfeed", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.into_command(), Command::Browse(SourceArgs { source: None })));
    }

    #[test]
    fn test_print_args() {
        let cli = Cli::try_parse_from([
            "factfeed", "print", "--tag", "Blade", "--batches", "3", "--source", "posts.json",
        ])
        .unwrap();
        match cli.into_command() {
            Command::Print {
                source,
                tag,
                search,
                batches,
            } => {
                assert_eq!(source.source.as_deref(), Some("posts.json"));
                assert_eq!(print_filter(tag, search), FeedFilter::Tag("Blade".to_string()));
                assert_eq!(batches, 3);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let both = Cli::try_parse_from(["factfeed", "print", "--tag", "a", "--search", "b"]);
        assert!(both.is_err());
    }

    #[test]
    fn test_print_filter_lowercases_search() {
        assert_eq!(
            print_filter(None, Some("BLA".to_string())),
            FeedFilter::TagSearch("bla".to_string())
        );
        assert_eq!(print_filter(None, None), FeedFilter::All);
    }

    #[test]
    fn test_format_node() {
        let post = Post {
            id: PostId::Number(7),
            title: "Fact #7".to_string(),
            text: "<p>Wesley &amp; friends</p>".to_string(),
            notes: String::new(),
            tags: vec!["Blade".to_string(), "vampires".to_string()],
            image: None,
        };
        let out = format_node(&post_node(&post, &RenderOptions::default()));
        assert_eq!(out, "#7 Fact #7\n  Wesley & friends\n  tags: Blade, vampires\n");
    }

    #[tokio::test]
    async fn test_run_check_reports_issues() {
        let dir = TempDir::new().unwrap();
        let clean = dir.path().join("clean.json");
        std::fs::write(
            &clean,
            r#"[
                {"id": 1, "title": "Fact #1", "text": "a"},
                {"id": "alert", "title": "Alert", "text": "b"},
                {"id": 2, "title": "Fact #2", "text": "c"}
            ]"#,
        )
        .unwrap();
        assert!(run_check(&clean).await.unwrap());

        let broken = dir.path().join("broken.json");
        std::fs::write(
            &broken,
            r#"[{"id": 1, "title": "Fact #1", "text": "a"}, {"id": 3, "title": "Fact #3", "text": "b"}]"#,
        )
        .unwrap();
        assert!(!run_check(&broken).await.unwrap());
    }
}

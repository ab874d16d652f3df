//! factfeed: a terminal reader for a static fact blog.
//!
//! Posts are fetched from the site's `posts.json`, cached locally for an hour,
//! and shown newest first in batches that load as the reader scrolls.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod feed;
pub mod html;
pub mod logging;
pub mod post;
pub mod render;
pub mod site;
pub mod source;
pub mod state;
pub mod ui;

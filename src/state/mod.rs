// State management module.
// Screen stack, feed screens, post screens, and the console log.

pub mod console;
pub mod feed_view;
pub mod navigation;
pub mod post_view;

pub use console::{ConsoleLevel, ConsoleMessage, ConsoleState};
pub use feed_view::{FeedEvent, FeedView};
pub use navigation::{BreadcrumbNode, Entry, NavigationStack, Screen, ViewLevel};
pub use post_view::PostView;

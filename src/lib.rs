//! # action-walk
//!
//! Asynchronous, depth-first directory walker that calls your actions.
//!
//! action-walk owns the traversal: it reads each directory, classifies every
//! entry as a directory, file, symbolic link or something else, optionally
//! fetches its metadata, and hands it to the action registered for that kind.
//! A directory action decides whether the walk descends by returning
//! [`Flow::Continue`] or [`Flow::Skip`]. It does **not** match globs, follow
//! symbolic links into directories, or deduplicate hard links; what to do with
//! an entry is up to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use action_walk::{Flow, StatMode};
//!
//! #[derive(Default)]
//! struct Totals {
//!     dirs:  usize,
//!     files: usize,
//!     bytes: u64,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), action_walk::WalkError> {
//! let totals = action_walk::walk_with("src", Totals::default())
//!     .stat(StatMode::Lstat)
//!     .on_dir(|_path, ctx| {
//!         ctx.own.dirs += 1;
//!         Ok(Flow::Continue)
//!     })
//!     .on_file(|_path, ctx| {
//!         ctx.own.files += 1;
//!         ctx.own.bytes += ctx.metadata.map_or(0, |m| m.len());
//!         Ok(())
//!     })
//!     .run()
//!     .await?;
//!
//! assert!(totals.files > 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Asynchronous actions
//!
//! Actions may suspend; the walk awaits each one before moving to the next
//! entry, so side effects land in a deterministic order.
//!
//! ```rust,no_run
//! use futures::FutureExt;
//! use action_walk::Flow;
//!
//! # async fn example() -> Result<(), action_walk::WalkError> {
//! let lines = action_walk::walk_with(".", 0usize)
//!     .dir_action(|_path, ctx| {
//!         async move {
//!             let skip = ctx.entry.name.starts_with('.');
//!             Ok(if skip { Flow::Skip } else { Flow::Continue })
//!         }
//!         .boxed()
//!     })
//!     .file_action(|path, ctx| {
//!         async move {
//!             let text = tokio::fs::read_to_string(path).await.unwrap_or_default();
//!             *ctx.own += text.lines().count();
//!             Ok(())
//!         }
//!         .boxed()
//!     })
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod builder;
mod context;
mod engine;
mod entry;
mod error;
mod traits;

use std::path::PathBuf;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::WalkBuilder;
pub use context::{AncestorStack, Context};
pub use engine::StatMode;
pub use entry::{Entry, EntryKind};
pub use error::{ActionError, ActionResult, WalkError};
pub use traits::{ActionFuture, DirAction, EntryAction, Flow};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Start configuring a walk of `root` with no accumulator.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> Result<(), action_walk::WalkError> {
/// action_walk::walk("/var/log")
///     .on_file(|path, _ctx| {
///         println!("{}", path.display());
///         Ok(())
///     })
///     .run()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn walk(root: impl Into<PathBuf>) -> WalkBuilder<()> {
    WalkBuilder::new(root.into(), ())
}

/// Start configuring a walk of `root` that threads `own` through every
/// action. [`WalkBuilder::run`] hands it back when the walk completes.
pub fn walk_with<T: Send>(root: impl Into<PathBuf>, own: T) -> WalkBuilder<T> {
    WalkBuilder::new(root.into(), own)
}

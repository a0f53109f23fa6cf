use std::path::{Path, PathBuf};

use crate::context::Context;
use crate::engine::{Actions, StatMode, Walker};
use crate::error::{ActionResult, WalkError};
use crate::traits::{ActionFuture, DirAction, EntryAction, Flow, Ready};

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Configures and runs one walk.
///
/// Created via [`walk()`](crate::walk) or [`walk_with()`](crate::walk_with).
/// Every action is optional:
///
/// - no directory action: every directory is descended into;
/// - no file or other action: those entries are passed over silently;
/// - no link action: symbolic links go to the file action, still tagged
///   [`EntryKind::Symlink`](crate::EntryKind::Symlink).
///
/// Each kind has three setters: `*_action` for closures returning a boxed
/// future, `on_*` for plain synchronous closures, and `*_handler` for types
/// implementing [`DirAction`] / [`EntryAction`].
///
/// # Example
///
/// ```rust,no_run
/// use action_walk::{Flow, StatMode};
///
/// # async fn example() -> Result<(), action_walk::WalkError> {
/// let total = action_walk::walk_with(".", 0u64)
///     .stat(StatMode::Lstat)
///     .on_dir(|_, ctx| {
///         if ctx.entry.name == "target" {
///             return Ok(Flow::Skip);
///         }
///         Ok(Flow::Continue)
///     })
///     .on_file(|_, ctx| {
///         *ctx.own += ctx.metadata.map_or(0, |m| m.len());
///         Ok(())
///     })
///     .run()
///     .await?;
/// println!("{total} bytes");
/// # Ok(())
/// # }
/// ```
pub struct WalkBuilder<T> {
    root:              PathBuf,
    own:               T,
    actions:           Actions<T>,
    stat:              StatMode,
    include_top_level: bool,
}

impl<T: Send> WalkBuilder<T> {
    pub(crate) fn new(root: PathBuf, own: T) -> Self {
        Self {
            root,
            own,
            actions: Actions::default(),
            stat: StatMode::Off,
            include_top_level: false,
        }
    }

    // ── Directory ─────────────────────────────────────────────────────────

    /// Set an asynchronous directory action. Return [`Flow::Skip`] to keep the
    /// walk out of the directory.
    pub fn dir_action<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionFuture<'a, Flow> + Send + Sync + 'static,
    {
        self.dir_handler(f)
    }

    /// Set a synchronous directory action.
    pub fn on_dir<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionResult<Flow> + Send + Sync + 'static,
    {
        self.dir_handler(Ready(f))
    }

    pub fn dir_handler(mut self, action: impl DirAction<T> + 'static) -> Self {
        self.actions.dir = Some(Box::new(action));
        self
    }

    // ── Files ─────────────────────────────────────────────────────────────

    /// Set an asynchronous file action.
    pub fn file_action<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionFuture<'a, ()> + Send + Sync + 'static,
    {
        self.file_handler(f)
    }

    /// Set a synchronous file action.
    pub fn on_file<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionResult<()> + Send + Sync + 'static,
    {
        self.file_handler(Ready(f))
    }

    pub fn file_handler(mut self, action: impl EntryAction<T> + 'static) -> Self {
        self.actions.file = Some(Box::new(action));
        self
    }

    // ── Symbolic links ────────────────────────────────────────────────────

    /// Set an asynchronous symbolic link action. Links are never followed
    /// into directories.
    pub fn link_action<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionFuture<'a, ()> + Send + Sync + 'static,
    {
        self.link_handler(f)
    }

    /// Set a synchronous symbolic link action.
    pub fn on_link<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionResult<()> + Send + Sync + 'static,
    {
        self.link_handler(Ready(f))
    }

    pub fn link_handler(mut self, action: impl EntryAction<T> + 'static) -> Self {
        self.actions.link = Some(Box::new(action));
        self
    }

    // ── Everything else ───────────────────────────────────────────────────

    /// Set an asynchronous action for devices, sockets, fifos and the like.
    pub fn other_action<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionFuture<'a, ()> + Send + Sync + 'static,
    {
        self.other_handler(f)
    }

    /// Set a synchronous action for devices, sockets, fifos and the like.
    pub fn on_other<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionResult<()> + Send + Sync + 'static,
    {
        self.other_handler(Ready(f))
    }

    pub fn other_handler(mut self, action: impl EntryAction<T> + 'static) -> Self {
        self.actions.other = Some(Box::new(action));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Fetch metadata for every entry. Accepts a [`StatMode`] or a `bool`
    /// (`true` selects [`StatMode::Stat`]). Off by default.
    pub fn stat(mut self, mode: impl Into<StatMode>) -> Self {
        self.stat = mode.into();
        self
    }

    /// Dispatch the root itself as the first directory entry, so it gets the
    /// directory action (with an empty stack) and can be skipped. Off by
    /// default.
    pub fn include_top_level(mut self, yes: bool) -> Self {
        self.include_top_level = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Run the walk and hand back the accumulator.
    ///
    /// Entries are visited depth-first, one at a time, in the order each
    /// directory stream yields them. Every action is awaited before the walk
    /// moves on.
    ///
    /// # Errors
    ///
    /// The first failure ends the walk: a directory that cannot be opened or
    /// read, a failed `stat`/`lstat`, or an error returned by an action.
    /// Walking a path that is not a directory fails with
    /// [`WalkError::NotADirectory`].
    pub async fn run(self) -> Result<T, WalkError> {
        let walker = Walker {
            actions:           self.actions,
            stat:              self.stat,
            include_top_level: self.include_top_level,
        };
        walker.run(self.root, self.own).await
    }
}

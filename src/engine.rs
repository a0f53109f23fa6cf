use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt};
use tokio::fs;
use tracing::{debug, trace};

use crate::context::{AncestorStack, Context};
use crate::entry::{base_name, Entry, EntryKind};
use crate::error::WalkError;
use crate::traits::{DirAction, EntryAction, Flow};

// ---------------------------------------------------------------------------
// StatMode
// ---------------------------------------------------------------------------

/// Which metadata, if any, is fetched for every entry.
///
/// Selected once per walk and applied uniformly, including to the root
/// pseudo-entry when top-level inclusion is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatMode {
    /// No metadata; [`Context::metadata`] is always `None`.
    #[default]
    Off,

    /// `stat`: follows symbolic links, so a link reports its target.
    Stat,

    /// `lstat`: reports on the link itself.
    Lstat,
}

impl From<bool> for StatMode {
    fn from(on: bool) -> Self {
        if on {
            Self::Stat
        } else {
            Self::Off
        }
    }
}

impl StatMode {
    async fn fetch(self, path: &Path) -> io::Result<Option<Metadata>> {
        match self {
            Self::Off => Ok(None),
            Self::Stat => fs::metadata(path).await.map(Some),
            Self::Lstat => fs::symlink_metadata(path).await.map(Some),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch table
// ---------------------------------------------------------------------------

/// One optional action per entry kind.
pub(crate) struct Actions<T> {
    pub dir:   Option<Box<dyn DirAction<T>>>,
    pub file:  Option<Box<dyn EntryAction<T>>>,
    pub link:  Option<Box<dyn EntryAction<T>>>,
    pub other: Option<Box<dyn EntryAction<T>>>,
}

impl<T> Default for Actions<T> {
    fn default() -> Self {
        Self {
            dir:   None,
            file:  None,
            link:  None,
            other: None,
        }
    }
}

impl<T> Actions<T> {
    /// The action for a non-directory kind.
    ///
    /// Symbolic links fall back to the file action when no link action is set.
    fn for_kind(&self, kind: EntryKind) -> Option<&dyn EntryAction<T>> {
        match kind {
            EntryKind::File => self.file.as_deref(),
            EntryKind::Symlink => self.link.as_deref().or(self.file.as_deref()),
            EntryKind::Other => self.other.as_deref(),
            EntryKind::Dir => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// Everything the builder hands to the engine.
pub(crate) struct Walker<T> {
    pub actions:           Actions<T>,
    pub stat:              StatMode,
    pub include_top_level: bool,
}

impl<T: Send> Walker<T> {
    /// Walk `root`, returning `own` once every reachable entry was visited.
    pub(crate) async fn run(&self, root: PathBuf, mut own: T) -> Result<T, WalkError> {
        let mut stack = AncestorStack::default();
        let start = Instant::now();
        debug!(
            root = %root.display(),
            stat = ?self.stat,
            include_top_level = self.include_top_level,
            "walk started"
        );

        if self.include_top_level {
            // The root gets its directory action before anything is opened,
            // so make sure it really is one.
            let meta = fs::metadata(&root)
                .await
                .map_err(|e| WalkError::open(&root, e))?;
            if !meta.is_dir() {
                return Err(WalkError::NotADirectory(root));
            }
            let entry = Entry::root(&root);
            self.visit(root, entry, &mut stack, &mut own).await?;
        } else {
            self.descend(root, &mut stack, &mut own).await?;
        }

        debug_assert!(stack.is_empty(), "ancestor stack not unwound: {stack:?}");
        debug!(elapsed = ?start.elapsed(), "walk finished");
        Ok(own)
    }

    /// Read `dir` and visit each of its entries in stream order.
    fn descend<'w>(
        &'w self,
        dir: PathBuf,
        stack: &'w mut AncestorStack,
        own: &'w mut T,
    ) -> BoxFuture<'w, Result<(), WalkError>> {
        async move {
            stack.push(base_name(&dir));
            trace!(dir = %dir.display(), depth = stack.len(), "opening directory");

            let mut stream = fs::read_dir(&dir)
                .await
                .map_err(|e| WalkError::open(&dir, e))?;
            while let Some(dirent) = stream
                .next_entry()
                .await
                .map_err(|e| WalkError::io(&dir, e))?
            {
                let path = dir.join(dirent.file_name());
                let file_type = dirent
                    .file_type()
                    .await
                    .map_err(|e| WalkError::io(&path, e))?;
                let entry = Entry {
                    name: dirent.file_name().to_string_lossy().into_owned(),
                    kind: EntryKind::from(file_type),
                };
                self.visit(path, entry, stack, own).await?;
            }

            stack.pop();
            Ok(())
        }
        .boxed()
    }

    /// Fetch metadata for one entry, run its action, and descend if it is a
    /// directory that was not skipped.
    async fn visit(
        &self,
        path: PathBuf,
        entry: Entry,
        stack: &mut AncestorStack,
        own: &mut T,
    ) -> Result<(), WalkError> {
        let metadata = self
            .stat
            .fetch(&path)
            .await
            .map_err(|e| WalkError::metadata(&path, e))?;
        trace!(path = %path.display(), kind = ?entry.kind, "visiting entry");

        let ctx = Context {
            entry: &entry,
            stack: &*stack,
            own: &mut *own,
            metadata: metadata.as_ref(),
        };

        if entry.kind != EntryKind::Dir {
            if let Some(action) = self.actions.for_kind(entry.kind) {
                action
                    .call(&path, ctx)
                    .await
                    .map_err(|e| WalkError::action(&path, e))?;
            }
            return Ok(());
        }

        let flow = match self.actions.dir.as_deref() {
            Some(action) => action
                .call(&path, ctx)
                .await
                .map_err(|e| WalkError::action(&path, e))?,
            None => Flow::Continue,
        };
        if flow == Flow::Skip {
            debug!(dir = %path.display(), "skipping directory");
            return Ok(());
        }
        self.descend(path, stack, own).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionResult;
    use crate::traits::{ActionFuture, Ready};

    type Seen = Vec<&'static str>;

    fn boxed<F>(f: F) -> Box<dyn EntryAction<Seen>>
    where
        F: for<'a> Fn(&'a Path, Context<'a, Seen>) -> ActionResult<()> + Send + Sync + 'static,
    {
        Box::new(Ready(f))
    }

    fn tag(name: &'static str) -> Box<dyn EntryAction<Seen>> {
        boxed(move |_, ctx| {
            ctx.own.push(name);
            Ok(())
        })
    }

    async fn dispatch(actions: &Actions<Seen>, kind: EntryKind) -> Seen {
        let mut own = Vec::new();
        let entry = Entry {
            name: "e".into(),
            kind,
        };
        let stack = AncestorStack::default();
        if let Some(action) = actions.for_kind(kind) {
            let ctx = Context {
                entry: &entry,
                stack: &stack,
                own: &mut own,
                metadata: None,
            };
            let fut: ActionFuture<'_, ()> = action.call(Path::new("e"), ctx);
            fut.await.unwrap();
        }
        own
    }

    #[tokio::test]
    async fn symlinks_fall_back_to_the_file_action() {
        let actions = Actions {
            file: Some(tag("file")),
            ..Actions::default()
        };
        assert_eq!(dispatch(&actions, EntryKind::Symlink).await, ["file"]);
        assert!(dispatch(&actions, EntryKind::Other).await.is_empty());
    }

    #[tokio::test]
    async fn link_action_wins_over_file_action() {
        let actions = Actions {
            file: Some(tag("file")),
            link: Some(tag("link")),
            other: Some(tag("other")),
            ..Actions::default()
        };
        assert_eq!(dispatch(&actions, EntryKind::Symlink).await, ["link"]);
        assert_eq!(dispatch(&actions, EntryKind::File).await, ["file"]);
        assert_eq!(dispatch(&actions, EntryKind::Other).await, ["other"]);
        assert!(dispatch(&actions, EntryKind::Dir).await.is_empty());
    }

    #[test]
    fn stat_mode_from_bool() {
        assert_eq!(StatMode::from(true), StatMode::Stat);
        assert_eq!(StatMode::from(false), StatMode::Off);
        assert_eq!(StatMode::default(), StatMode::Off);
    }
}

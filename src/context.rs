use std::fs::Metadata;
use std::ops::Deref;

use crate::entry::Entry;

/// Everything an action receives besides the entry's path.
///
/// All references live only as long as the action's call (and the future it
/// returns). `own` is the caller's accumulator, threaded through every action
/// of the walk; no two actions ever run at the same time, so it needs no
/// locking.
pub struct Context<'a, T> {
    /// The entry being visited.
    pub entry: &'a Entry,

    /// Base names of the directories currently open, root first.
    pub stack: &'a AncestorStack,

    /// The caller's accumulator.
    pub own: &'a mut T,

    /// `stat` or `lstat` result, present only when a [`StatMode`](crate::StatMode)
    /// other than `Off` was configured.
    pub metadata: Option<&'a Metadata>,
}

/// Base names of the directories between the walk root and the entry being
/// visited, root first.
///
/// The engine pushes a directory's name before reading it and pops it once
/// every entry inside has been handled. Actions get a borrow of the live stack,
/// which cannot outlive the action:
///
/// ```compile_fail
/// use action_walk::AncestorStack;
///
/// # async fn f() {
/// let kept: Vec<&AncestorStack> = Vec::new();
/// action_walk::walk_with(".", kept)
///     .on_file(|_, ctx| {
///         ctx.own.push(ctx.stack);
///         Ok(())
///     })
///     .run()
///     .await
///     .unwrap();
/// # }
/// ```
///
/// Use [`snapshot`](AncestorStack::snapshot) to keep a copy instead.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AncestorStack(Vec<String>);

impl AncestorStack {
    pub(crate) fn push(&mut self, name: String) {
        self.0.push(name);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// An owned copy of the stack as it is right now.
    pub fn snapshot(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl Deref for AncestorStack {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

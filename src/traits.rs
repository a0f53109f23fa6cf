use std::path::Path;

use futures::future::{self, BoxFuture, FutureExt};

use crate::context::Context;
use crate::error::ActionResult;

/// The boxed future an action returns.
pub type ActionFuture<'a, R> = BoxFuture<'a, ActionResult<R>>;

/// What a directory action tells the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Descend into the directory.
    #[default]
    Continue,

    /// Do not descend. Siblings are still visited.
    Skip,
}

/// Called for every directory entry. Its [`Flow`] decides whether the walk
/// descends into it.
///
/// Implemented for any closure `Fn(&Path, Context<T>) -> ActionFuture<Flow>`,
/// so most callers never name this trait. Implement it directly for reusable
/// actions that carry their own configuration.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use futures::FutureExt;
/// use action_walk::{ActionFuture, Context, DirAction, Flow};
///
/// /// Refuses to enter directories with one of the listed names.
/// struct SkipNamed(Vec<&'static str>);
///
/// impl<T> DirAction<T> for SkipNamed {
///     fn call<'a>(&'a self, _path: &'a Path, ctx: Context<'a, T>) -> ActionFuture<'a, Flow> {
///         let skip = self.0.contains(&ctx.entry.name.as_str());
///         async move { Ok(if skip { Flow::Skip } else { Flow::Continue }) }.boxed()
///     }
/// }
/// ```
pub trait DirAction<T>: Send + Sync {
    fn call<'a>(&'a self, path: &'a Path, ctx: Context<'a, T>) -> ActionFuture<'a, Flow>;
}

/// Called for file, symbolic link and other entries. It can only observe;
/// there is nothing to skip below a non-directory.
pub trait EntryAction<T>: Send + Sync {
    fn call<'a>(&'a self, path: &'a Path, ctx: Context<'a, T>) -> ActionFuture<'a, ()>;
}

impl<T, F> DirAction<T> for F
where
    F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionFuture<'a, Flow> + Send + Sync,
{
    fn call<'a>(&'a self, path: &'a Path, ctx: Context<'a, T>) -> ActionFuture<'a, Flow> {
        self(path, ctx)
    }
}

impl<T, F> EntryAction<T> for F
where
    F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionFuture<'a, ()> + Send + Sync,
{
    fn call<'a>(&'a self, path: &'a Path, ctx: Context<'a, T>) -> ActionFuture<'a, ()> {
        self(path, ctx)
    }
}

/// Adapts a synchronous closure into an action that completes immediately.
pub(crate) struct Ready<F>(pub F);

impl<T, F> DirAction<T> for Ready<F>
where
    F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionResult<Flow> + Send + Sync,
{
    fn call<'a>(&'a self, path: &'a Path, ctx: Context<'a, T>) -> ActionFuture<'a, Flow> {
        future::ready((self.0)(path, ctx)).boxed()
    }
}

impl<T, F> EntryAction<T> for Ready<F>
where
    F: for<'a> Fn(&'a Path, Context<'a, T>) -> ActionResult<()> + Send + Sync,
{
    fn call<'a>(&'a self, path: &'a Path, ctx: Context<'a, T>) -> ActionFuture<'a, ()> {
        future::ready((self.0)(path, ctx)).boxed()
    }
}

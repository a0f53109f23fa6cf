//! Delete `node_modules/.cache` and `dist` directories from a repository.
//!
//! Dry run unless told what to delete:
//!
//! ```text
//! cargo run --example clean-repo -- [cache|dist|all]...
//! ```
//!
//! Deletes are started from the directory action and not awaited there, so
//! the walk keeps going while they run. Their handles are kept in the
//! accumulator and awaited once the walk is done.

use std::io;
use std::path::{Path, PathBuf};

use action_walk::Flow;
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// What to delete; nothing is deleted when empty
    #[arg(value_enum)]
    targets: Vec<Target>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    Cache,
    Dist,
    All,
}

#[derive(Default)]
struct Own {
    delete_cache: bool,
    delete_dist: bool,
    deletes: Vec<JoinHandle<()>>,
}

impl Own {
    fn delete(&mut self, path: PathBuf) {
        self.deletes.push(tokio::spawn(delete_tree(path)));
    }
}

async fn delete_tree(path: PathBuf) {
    match tokio::fs::remove_dir_all(&path).await {
        Ok(()) => println!("[deleted {}]", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!("? {} does not exist", path.display());
        }
        Err(e) => println!("? ERROR deleting {}: {e}", path.display()),
    }
}

fn is_under_node_modules(path: &Path) -> bool {
    path.parent()
        .and_then(Path::file_name)
        .is_some_and(|parent| parent == "node_modules")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Only run from a repository root.
    if !Path::new("Cargo.toml").exists() && !Path::new("package.json").exists() {
        bail!("no Cargo.toml or package.json here; run this from the repository root");
    }

    let args = Args::parse();
    let mut own = Own::default();
    for target in args.targets {
        match target {
            Target::Cache => own.delete_cache = true,
            Target::Dist => own.delete_dist = true,
            Target::All => {
                own.delete_cache = true;
                own.delete_dist = true;
            }
        }
    }
    if !own.delete_cache && !own.delete_dist {
        println!("! neither cache nor dist was specified; executing dry run");
    }

    let own = action_walk::walk_with(".", own)
        .on_dir(|path, ctx| {
            let name = ctx.entry.name.as_str();

            // Inside node_modules only .cache is of interest.
            if is_under_node_modules(path) {
                if name != ".cache" {
                    return Ok(Flow::Skip);
                }
                if ctx.own.delete_cache {
                    ctx.own.delete(path.to_path_buf());
                } else {
                    println!("[DRY RUN: deleting {}]", path.display());
                }
                return Ok(Flow::Skip);
            }

            if name == "dist" {
                if ctx.own.delete_dist {
                    ctx.own.delete(path.to_path_buf());
                } else {
                    println!("[DRY RUN: deleting {}]", path.display());
                }
                return Ok(Flow::Skip);
            }

            Ok(Flow::Continue)
        })
        .run()
        .await?;

    for delete in own.deletes {
        delete.await?;
    }
    println!("done");
    Ok(())
}

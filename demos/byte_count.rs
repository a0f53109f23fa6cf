//! Total the bytes under a directory, leaving out excluded subtrees.
//!
//! ```text
//! cargo run --example byte-count -- [DIR] [--skip NAME]...
//! ```

use std::path::PathBuf;

use action_walk::Flow;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Directory to total
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Directory names whose subtrees are not counted
    #[arg(long = "skip", default_values = ["node_modules", "target", ".git"])]
    skip_dirs: Vec<String>,
}

struct Own {
    total: u64,
    skip_dirs: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let own = Own {
        total: 0,
        skip_dirs: args.skip_dirs,
    };

    let own = action_walk::walk_with(&args.dir, own)
        .stat(true)
        .on_dir(|_, ctx| {
            if ctx.own.skip_dirs.contains(&ctx.entry.name) {
                return Ok(Flow::Skip);
            }
            ctx.own.total += ctx.metadata.map_or(0, |m| m.len());
            Ok(Flow::Continue)
        })
        .on_file(|_, ctx| {
            ctx.own.total += ctx.metadata.map_or(0, |m| m.len());
            Ok(())
        })
        .run()
        .await?;

    println!(
        "total bytes in {:?} (excluding {}): {}",
        args.dir,
        own.skip_dirs.join(", "),
        own.total
    );
    Ok(())
}

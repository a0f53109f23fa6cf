use std::path::PathBuf;

use action_walk::{Flow, StatMode};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Walk a directory tree, printing each entry's size and the total
#[derive(Parser)]
#[command(name = "action-walk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to walk
    directory: PathBuf,

    /// Report the directory itself as the first entry
    #[arg(short = 't', long)]
    include_top_level: bool,

    /// Which metadata call sizes come from
    #[arg(long, value_enum, default_value_t = StatArg::Lstat)]
    stat: StatArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatArg {
    /// Follow symbolic links
    Stat,
    /// Report on links themselves
    Lstat,
}

impl From<StatArg> for StatMode {
    fn from(arg: StatArg) -> Self {
        match arg {
            StatArg::Stat => StatMode::Stat,
            StatArg::Lstat => StatMode::Lstat,
        }
    }
}

#[derive(Default)]
struct Own {
    total: u64,
}

/// Logs go to stderr, filtered by `RUST_LOG` (warnings only when unset).
fn set_up_logging() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    set_up_logging();

    let own = action_walk::walk_with(&cli.directory, Own::default())
        .stat(StatMode::from(cli.stat))
        .include_top_level(cli.include_top_level)
        .on_dir(|_, ctx| {
            let size = ctx.metadata.map_or(0, |m| m.len());
            println!("{}/ {}", ctx.entry.name, size);
            ctx.own.total += size;
            Ok(Flow::Continue)
        })
        // Links arrive here too, since no link action is set.
        .on_file(|_, ctx| {
            let size = ctx.metadata.map_or(0, |m| m.len());
            if ctx.entry.is_symlink() {
                println!("{} -> {}", ctx.entry.name, size);
            } else {
                println!("{} {}", ctx.entry.name, size);
            }
            ctx.own.total += size;
            Ok(())
        })
        .run()
        .await
        .with_context(|| format!("failed to walk {}", cli.directory.display()))?;

    println!("total: {}", own.total);
    Ok(())
}

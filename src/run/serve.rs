use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::kv::{KvStore, MemoryKv, SqliteKv};
use crate::ledger::Ledger;
use crate::server;

/// Runs the REST server until ctrl-c. `memory` swaps the SQLite file for a
/// throwaway in-process store.
pub(crate) fn serve(config: &Config, memory: bool) -> Result<()> {
    let store: Arc<dyn KvStore> = if memory {
        tracing::warn!("using an in-memory store; nothing is kept after exit");
        Arc::new(MemoryKv::new())
    } else {
        tracing::info!(db = %config.db_path.display(), "opening store");
        Arc::new(SqliteKv::open(&config.db_path)?)
    };
    let ledger = Ledger::new(store);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(server::run_server(config.bind, &config.prefix, ledger))
}

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{error, info};

use crate::cache::IssueCache;
use crate::client::LinearClient;
use crate::error::Result;
use crate::types::Issue;

pub type RefreshOutcome = Result<Vec<Issue>>;

/// Fetch once and persist the result before anyone else sees it.
///
/// A failed fetch leaves the cache file untouched. A failed cache write is
/// logged and the fresh issues are still returned.
pub async fn refresh_once(client: &LinearClient, cache: &IssueCache) -> RefreshOutcome {
    info!("fetching assigned issues");
    let issues = client.assigned_issues().await?;
    info!(count = issues.len(), "fetched active issues");

    if let Err(err) = cache.save(&issues) {
        error!(%err, "failed to cache issues");
    }

    Ok(issues)
}

/// Run one refresh cycle on its own thread and report back through `tx`.
pub fn spawn(
    client: LinearClient,
    cache: IssueCache,
    tx: Sender<RefreshOutcome>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("lil-refresh".to_string())
        .spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(refresh_once(&client, &cache)),
                Err(err) => Err(err.into()),
            };
            // The receiver only goes away when the UI loop has already quit.
            let _ = tx.send(outcome);
        })
}

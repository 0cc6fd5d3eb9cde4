use sqlx::postgres::PgListener;
use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::reports::services::LiveQuery;

/// Notification channel fired by the `reports` insert trigger
pub const REPORTS_CHANNEL: &str = "reports_changed";

/// Background worker that refreshes the live query whenever the database
/// reports a change, so writes from other instances reach every feed.
pub struct ChangeListener {
    pool: PgPool,
    live_query: Arc<LiveQuery>,
}

impl ChangeListener {
    pub fn new(pool: PgPool, live_query: Arc<LiveQuery>) -> Self {
        Self { pool, live_query }
    }

    /// Run the listener until the subscription fails, then surface the
    /// failure on the feed. `PgListener` reconnects on its own after a
    /// dropped connection.
    pub async fn run(&self) {
        tracing::info!("Starting report change listener on '{}'", REPORTS_CHANNEL);

        if let Err(e) = self.listen().await {
            tracing::error!("Report change listener stopped: {:?}", e);
            self.live_query.fail(e.to_string()).await;
        }
    }

    async fn listen(&self) -> Result<()> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(REPORTS_CHANNEL).await?;

        // Anything written before the subscription was live
        self.live_query.refresh().await;

        loop {
            let notification = listener.recv().await?;
            tracing::debug!(
                "Received {} notification for report {}",
                notification.channel(),
                notification.payload()
            );
            self.live_query.refresh().await;
        }
    }
}

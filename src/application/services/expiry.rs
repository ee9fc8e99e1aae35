//! Background task that archives stale pending bookings.
//!
//! Disabled by default; when the `[holds]` config section enables it, the
//! task sweeps every `check_interval_secs` and archives pending bookings
//! older than the configured TTL as `expired`.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use super::booking::BookingService;
use crate::support::shutdown::ShutdownSignal;

/// Start the pending-booking expiry background task.
pub fn start_pending_expiry_task(
    bookings: Arc<BookingService>,
    shutdown: ShutdownSignal,
    ttl_hours: u64,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            ttl_hours,
            check_interval = check_interval_secs,
            "📅 Pending-booking expiry task started"
        );

        let ttl = chrono::Duration::hours(ttl_hours as i64);
        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match bookings.expire_stale_pending(ttl).await {
                        Ok(0) => {}
                        Ok(count) => info!(count, "Expired stale pending bookings"),
                        Err(e) => warn!(error = %e, "Pending expiry sweep error"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("📅 Pending-booking expiry task shutting down");
                    break;
                }
            }
        }

        info!("📅 Pending-booking expiry task stopped");
    });
}

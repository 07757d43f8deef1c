//! Cron scheduler for periodic background tasks.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use drive_core::config::worker::WorkerConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;

use crate::jobs::reaper::Reaper;

/// Cron-based scheduler running the recurring jobs.
pub struct CronScheduler {
    scheduler: JobScheduler,
    reaper: Reaper,
    reaper_schedule: String,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("reaper_schedule", &self.reaper_schedule)
            .finish()
    }
}

impl CronScheduler {
    /// Create a scheduler with its jobs not yet registered.
    pub async fn new(config: &WorkerConfig, reaper: Reaper) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            reaper,
            reaper_schedule: config.reaper_schedule.clone(),
        })
    }

    /// Register the reaper and start ticking.
    ///
    /// Job errors are logged and never tear the loop down.
    pub async fn start(&self) -> AppResult<()> {
        let reaper = self.reaper.clone();
        let job = CronJob::new_async(self.reaper_schedule.as_str(), move |_uuid, _lock| {
            let reaper = reaper.clone();
            Box::pin(async move {
                if let Err(e) = reaper.run().await {
                    error!(error = %e, "Pending-node reaper failed");
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Invalid reaper schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to register reaper job: {e}")))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!(schedule = %self.reaper_schedule, "Cron scheduler started");
        Ok(())
    }

    /// Stop the scheduler.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }
}

use crate::{
    foundation::core::JobId,
    foundation::error::{KeylineError, KeylineResult},
};

/// Status of the one external render/generation job the editor tracks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Nothing submitted.
    #[default]
    Idle,
    /// Accepted, waiting for a worker.
    Queued,
    /// Running.
    Processing,
    /// Finished with output.
    Completed,
    /// Finished without output.
    Failed,
}

impl JobStatus {
    /// Whether moving from `self` to `next` follows
    /// `idle -> queued -> processing -> {completed | failed} -> idle`.
    ///
    /// A queued job may also finish directly (the service never reported it running) or
    /// fail before it starts. Repeating the current status is accepted so duplicate
    /// notifications are harmless.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        use JobStatus::*;
        self == next
            || matches!(
                (self, next),
                (Idle, Queued)
                    | (Queued, Processing)
                    | (Queued, Completed)
                    | (Queued, Failed)
                    | (Processing, Completed)
                    | (Processing, Failed)
                    | (Completed, Idle)
                    | (Failed, Idle)
            )
    }

    /// `true` for completed and failed.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Status notification from the external job service.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    /// Job the notification is about.
    pub job_id: JobId,
    /// Reported status.
    pub status: JobStatus,
    /// Result location once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
}

/// Bookkeeping for one external job. It never touches timeline data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobTracker {
    job_id: Option<JobId>,
    status: JobStatus,
    output_url: Option<String>,
}

impl JobTracker {
    /// Tracked job id.
    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Output location reported on completion.
    pub fn output_url(&self) -> Option<&str> {
        self.output_url.as_deref()
    }

    /// Replace the tracked job id.
    pub fn set_job_id(&mut self, id: Option<JobId>) {
        if self.job_id != id {
            self.output_url = None;
        }
        self.job_id = id;
    }

    /// Move to `status`, rejecting moves outside the job lifecycle.
    pub fn set_status(&mut self, status: JobStatus) -> KeylineResult<()> {
        if !self.status.can_transition_to(status) {
            return Err(KeylineError::validation(format!(
                "job status cannot go from {:?} to {:?}",
                self.status, status
            )));
        }
        self.status = status;
        Ok(())
    }

    /// Apply a notification. Updates for another job are ignored (`Ok(false)`).
    ///
    /// An out-of-order notification for a queued or processing job marks it failed before
    /// the error is returned, so a new job can be submitted.
    pub fn apply_update(&mut self, update: JobUpdate) -> KeylineResult<bool> {
        if self.job_id.as_ref() != Some(&update.job_id) {
            return Ok(false);
        }
        if let Err(err) = self.set_status(update.status) {
            if matches!(self.status, JobStatus::Queued | JobStatus::Processing) {
                self.status = JobStatus::Failed;
            }
            return Err(err);
        }
        if update.output_url.is_some() {
            self.output_url = update.output_url;
        }
        Ok(true)
    }

    /// Back to idle with no job.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/job.rs"]
mod tests;

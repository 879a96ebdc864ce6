use crate::{
    foundation::core::JobId,
    foundation::error::{KeylineError, KeylineResult},
    model::project::Project,
    store::job::JobStatus,
    store::timeline::TimelineStore,
};

/// Remote service that renders a project snapshot asynchronously.
///
/// Progress comes back later as [`crate::JobUpdate`] notifications, applied with
/// [`TimelineStore::apply_job_update`].
pub trait RenderJobService {
    /// Hand over a complete project. Returns the id the service will report progress under.
    fn submit(&mut self, project: &Project) -> KeylineResult<JobId>;
}

/// Submit the store's current project for rendering.
///
/// The job moves to queued before the call; a refused submission marks it failed and
/// returns the service error. A job still queued or processing blocks a new submission;
/// a finished one is reset to idle first.
pub fn submit_render(
    store: &mut TimelineStore,
    service: &mut dyn RenderJobService,
) -> KeylineResult<JobId> {
    match store.job().status() {
        JobStatus::Queued | JobStatus::Processing => {
            return Err(KeylineError::job("a render job is already in flight"));
        }
        JobStatus::Completed | JobStatus::Failed => store.set_status(JobStatus::Idle)?,
        JobStatus::Idle => {}
    }
    store.project().validate()?;

    store.set_job_id(None);
    store.set_status(JobStatus::Queued)?;
    match service.submit(store.project()) {
        Ok(id) => {
            tracing::debug!(job = %id, "render job submitted");
            store.set_job_id(Some(id.clone()));
            Ok(id)
        }
        Err(err) => {
            tracing::warn!(error = %err, "render job submission failed");
            store.set_status(JobStatus::Failed)?;
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;

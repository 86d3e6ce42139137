//! Recording job dispatch fake.

use async_trait::async_trait;
use postern_service::{DispatchError, JobData, JobDispatch, JobOptions};
use std::sync::Mutex;

/// [`JobDispatch`] fake that records every enqueued job.
#[derive(Default)]
pub struct RecordingDispatch {
    jobs: Mutex<Vec<(JobData, Option<JobOptions>)>>,
    failure: Mutex<Option<String>>,
}

impl RecordingDispatch {
    /// Create a dispatch that accepts every job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent enqueue fail with a transport diagnostic.
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_owned());
    }

    /// Every job enqueued, in order.
    pub fn jobs(&self) -> Vec<(JobData, Option<JobOptions>)> {
        self.jobs.lock().unwrap().clone()
    }

    /// How many jobs have been enqueued.
    pub fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }
}

#[async_trait]
impl JobDispatch for RecordingDispatch {
    async fn add(&self, job: JobData, options: Option<JobOptions>) -> Result<(), DispatchError> {
        if let Some(reason) = self.failure.lock().unwrap().clone() {
            return Err(DispatchError::new(reason));
        }
        self.jobs.lock().unwrap().push((job, options));
        Ok(())
    }
}

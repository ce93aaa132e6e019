//! Mock placer for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::placer::{
    PlacedFile, PlacementJob, PlacementResult, Placer, PlacerError, RollbackPlan, RollbackResult,
};

/// Mock implementation of the Placer trait.
///
/// Records submitted jobs for assertions and reports success without
/// touching the filesystem. A failure message can be injected to simulate
/// a placement error.
#[derive(Debug, Clone, Default)]
pub struct MockPlacer {
    /// Recorded placement jobs.
    jobs: Arc<RwLock<Vec<PlacementJob>>>,
    /// Recorded rollback plans.
    rollbacks: Arc<RwLock<Vec<String>>>,
    /// If set, place fails with this reason.
    failure: Arc<RwLock<Option<String>>>,
}

impl MockPlacer {
    /// Create a new mock placer.
    pub fn new() -> Self {
        Self::default()
    }

    /// All placement jobs submitted so far.
    pub async fn jobs(&self) -> Vec<PlacementJob> {
        self.jobs.read().await.clone()
    }

    /// Job IDs of executed rollbacks.
    pub async fn rollbacks(&self) -> Vec<String> {
        self.rollbacks.read().await.clone()
    }

    /// Makes the next place call fail with the given reason.
    pub async fn fail_with(&self, reason: &str) {
        *self.failure.write().await = Some(reason.to_string());
    }
}

#[async_trait]
impl Placer for MockPlacer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn place(&self, job: PlacementJob) -> Result<PlacementResult, PlacerError> {
        self.jobs.write().await.push(job.clone());

        if let Some(reason) = self.failure.write().await.take() {
            return Err(PlacerError::RollbackFailed { reason });
        }

        let mut total_bytes = 0u64;
        let files_placed: Vec<PlacedFile> = job
            .files
            .iter()
            .map(|f| {
                let size_bytes = std::fs::metadata(&f.source).map(|m| m.len()).unwrap_or(0);
                total_bytes += size_bytes;
                PlacedFile {
                    report_id: f.report_id.clone(),
                    destination: f.destination.clone(),
                    size_bytes,
                    checksum: None,
                }
            })
            .collect();

        Ok(PlacementResult {
            job_id: job.job_id,
            files_placed,
            total_bytes,
            duration_ms: 1,
        })
    }

    async fn rollback(&self, plan: RollbackPlan) -> RollbackResult {
        self.rollbacks.write().await.push(plan.job_id.clone());
        RollbackResult {
            job_id: plan.job_id,
            files_removed: plan.placed_files.len(),
            directories_removed: plan.created_directories.len(),
            errors: vec![],
            success: true,
        }
    }

    async fn validate(&self) -> Result<(), PlacerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_placer_records_jobs() {
        let placer = MockPlacer::new();
        let job = PlacementJob {
            job_id: "run-1".to_string(),
            files: vec![],
            cleanup_sources: false,
            enable_rollback: true,
        };

        let result = placer.place(job).await.unwrap();
        assert_eq!(result.job_id, "run-1");
        assert_eq!(placer.jobs().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_placer_failure_injection() {
        let placer = MockPlacer::new();
        placer.fail_with("disk full").await;

        let job = PlacementJob {
            job_id: "run-1".to_string(),
            files: vec![],
            cleanup_sources: false,
            enable_rollback: true,
        };

        assert!(placer.place(job).await.is_err());
    }
}

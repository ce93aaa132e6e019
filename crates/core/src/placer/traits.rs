//! Trait definitions for the placer module.

use async_trait::async_trait;

use super::error::PlacerError;
use super::types::{PlacementJob, PlacementResult, RollbackPlan, RollbackResult};

/// A placer that can move report files to their final destinations.
#[async_trait]
pub trait Placer: Send + Sync {
    /// Returns the name of this placer implementation.
    fn name(&self) -> &str;

    /// Places files according to the job specification.
    async fn place(&self, job: PlacementJob) -> Result<PlacementResult, PlacerError>;

    /// Rolls back a failed placement using the rollback plan.
    async fn rollback(&self, plan: RollbackPlan) -> RollbackResult;

    /// Validates that the placer is properly configured and ready.
    async fn validate(&self) -> Result<(), PlacerError>;
}

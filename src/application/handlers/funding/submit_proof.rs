//! SubmitProofHandler - Accepts a proof submission for an activity.
//!
//! Only the submitter's identity is verified; proof data is not stored yet.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{
    ActivityId, ActorId, CommandMetadata, DomainError, MilestoneId, ProjectId,
};
use crate::ports::IdentityProvider;

#[derive(Debug, Clone)]
pub struct SubmitProofCommand {
    pub project_id: ProjectId,
    pub milestone_id: MilestoneId,
    pub activity_id: ActivityId,
    pub proof_reference: String,
    pub fund_requested: f64,
    pub remarks: String,
}

#[derive(Debug, Clone)]
pub struct SubmitProofResult {
    pub submitted_by: ActorId,
}

pub struct SubmitProofHandler {
    identity: Arc<dyn IdentityProvider>,
}

impl SubmitProofHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    pub async fn handle(
        &self,
        cmd: SubmitProofCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitProofResult, DomainError> {
        let submitted_by = self.identity.current_actor(&metadata)?;

        info!(
            actor = %submitted_by,
            activity_id = %cmd.activity_id,
            proof_reference = %cmd.proof_reference,
            "Proof submitted"
        );
        Ok(SubmitProofResult { submitted_by })
    }
}

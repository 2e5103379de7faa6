//! Name-based dispatch of ledger invocations.
//!
//! `Chaincode` owns one handler per operation and routes a raw
//! `(function, args)` pair to it. Every invocation goes through the same
//! gate before touching the store:
//!
//! 1. resolve the operation name
//! 2. sanitize the positional arguments
//! 3. check the arity
//! 4. resolve the caller (mutating operations only)

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::application::handlers::{
    AddActivityCommand, AddActivityHandler, AddMilestoneCommand, AddMilestoneHandler,
    AddProjectCommand, AddProjectHandler, DeleteActivityCommand, DeleteActivityHandler,
    DeleteMilestoneCommand, DeleteMilestoneHandler, DeleteProjectCommand, DeleteProjectHandler,
    FundProjectCommand, FundProjectHandler, GetHistoryHandler, GetHistoryQuery, QueryAllHandler,
    QueryAllQuery, QueryRecordsHandler, QueryRecordsQuery, SubmitProofCommand, SubmitProofHandler,
    UpdateActivityCommand, UpdateActivityHandler, UpdateActivityStatusCommand,
    UpdateActivityStatusHandler, UpdateMilestoneCommand, UpdateMilestoneHandler,
    UpdateMilestoneStatusCommand, UpdateMilestoneStatusHandler, UpdateProjectCommand,
    UpdateProjectHandler, UpdateProjectStatusCommand, UpdateProjectStatusHandler,
};
use crate::application::CommitReceipt;
use crate::config::LedgerConfig;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::ports::{IdentityProvider, StateStore};

use super::{Arguments, Operation};

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationOutput {
    /// Response body: the primary record for writes, an array for queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Present when the invocation committed writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<CommitReceipt>,
}

impl InvocationOutput {
    fn written(payload: Option<Value>, receipt: CommitReceipt) -> Self {
        Self {
            payload,
            receipt: Some(receipt),
        }
    }

    fn read(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            receipt: None,
        }
    }
}

/// Router over every ledger operation.
pub struct Chaincode {
    max_argument_length: usize,
    identity: Arc<dyn IdentityProvider>,

    add_project: AddProjectHandler,
    update_project: UpdateProjectHandler,
    update_project_status: UpdateProjectStatusHandler,
    delete_project: DeleteProjectHandler,

    add_milestone: AddMilestoneHandler,
    update_milestone: UpdateMilestoneHandler,
    update_milestone_status: UpdateMilestoneStatusHandler,
    delete_milestone: DeleteMilestoneHandler,

    add_activity: AddActivityHandler,
    update_activity: UpdateActivityHandler,
    update_activity_status: UpdateActivityStatusHandler,
    delete_activity: DeleteActivityHandler,

    fund_project: FundProjectHandler,
    submit_proof: SubmitProofHandler,

    query_records: QueryRecordsHandler,
    query_all: QueryAllHandler,
    get_history: GetHistoryHandler,
}

impl Chaincode {
    pub fn new(
        store: Arc<dyn StateStore>,
        identity: Arc<dyn IdentityProvider>,
        config: &LedgerConfig,
    ) -> Self {
        Self {
            max_argument_length: config.max_argument_length,
            identity: identity.clone(),

            add_project: AddProjectHandler::new(store.clone()),
            update_project: UpdateProjectHandler::new(store.clone()),
            update_project_status: UpdateProjectStatusHandler::new(store.clone()),
            delete_project: DeleteProjectHandler::new(store.clone()),

            add_milestone: AddMilestoneHandler::new(store.clone()),
            update_milestone: UpdateMilestoneHandler::new(store.clone()),
            update_milestone_status: UpdateMilestoneStatusHandler::new(store.clone()),
            delete_milestone: DeleteMilestoneHandler::new(store.clone()),

            add_activity: AddActivityHandler::new(store.clone()),
            update_activity: UpdateActivityHandler::new(store.clone()),
            update_activity_status: UpdateActivityStatusHandler::new(store.clone()),
            delete_activity: DeleteActivityHandler::new(store.clone()),

            fund_project: FundProjectHandler::new(store.clone()),
            submit_proof: SubmitProofHandler::new(identity),

            query_records: QueryRecordsHandler::new(store.clone()),
            query_all: QueryAllHandler::new(store.clone()),
            get_history: GetHistoryHandler::new(store),
        }
    }

    /// Runs one invocation.
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` for an unrecognized function name
    /// - `InvalidArgument` for empty, oversized or miscounted arguments
    /// - `Unauthorized` when a mutating call carries no usable identity
    /// - whatever the operation's handler reports
    pub async fn invoke(
        &self,
        function: &str,
        args: Vec<String>,
        metadata: CommandMetadata,
    ) -> Result<InvocationOutput, DomainError> {
        let result = self.route(function, args, metadata.clone()).await;
        match &result {
            Ok(output) => debug!(
                function,
                tx_id = %metadata.tx_id,
                committed = output.receipt.is_some(),
                "Invocation succeeded"
            ),
            Err(err) => warn!(
                function,
                tx_id = %metadata.tx_id,
                code = %err.code,
                error = %err.message,
                "Invocation failed"
            ),
        }
        result
    }

    async fn route(
        &self,
        function: &str,
        args: Vec<String>,
        metadata: CommandMetadata,
    ) -> Result<InvocationOutput, DomainError> {
        let operation: Operation = function.parse()?;
        let args = Arguments::sanitize(args, self.max_argument_length)?;
        args.expect_arity(operation.arity())?;

        if !operation.is_read_only() {
            let actor = self.identity.current_actor(&metadata)?;
            info!(
                operation = %operation,
                actor = %actor,
                tx_id = %metadata.tx_id,
                "Dispatching invocation"
            );
        }

        self.dispatch(operation, &args, metadata).await
    }

    async fn dispatch(
        &self,
        operation: Operation,
        args: &Arguments,
        metadata: CommandMetadata,
    ) -> Result<InvocationOutput, DomainError> {
        let output = match operation {
            Operation::AddProject => {
                let result = self
                    .add_project
                    .handle(AddProjectCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.project)?), result.receipt)
            }
            Operation::UpdateProject => {
                let result = self
                    .update_project
                    .handle(UpdateProjectCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.project)?), result.receipt)
            }
            Operation::UpdateProjectStatus => {
                let result = self
                    .update_project_status
                    .handle(UpdateProjectStatusCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.project)?), result.receipt)
            }
            Operation::DeleteProject => {
                let result = self
                    .delete_project
                    .handle(DeleteProjectCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(None, result.receipt)
            }
            Operation::AddMilestone => {
                let result = self
                    .add_milestone
                    .handle(AddMilestoneCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.milestone)?), result.receipt)
            }
            Operation::UpdateMilestone => {
                let result = self
                    .update_milestone
                    .handle(UpdateMilestoneCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.milestone)?), result.receipt)
            }
            Operation::UpdateMilestoneStatus => {
                let result = self
                    .update_milestone_status
                    .handle(UpdateMilestoneStatusCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.milestone)?), result.receipt)
            }
            Operation::DeleteMilestone => {
                let result = self
                    .delete_milestone
                    .handle(DeleteMilestoneCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(None, result.receipt)
            }
            Operation::AddActivity => {
                let result = self
                    .add_activity
                    .handle(AddActivityCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.activity)?), result.receipt)
            }
            Operation::UpdateActivity => {
                let result = self
                    .update_activity
                    .handle(UpdateActivityCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.activity)?), result.receipt)
            }
            Operation::UpdateActivityStatus => {
                let result = self
                    .update_activity_status
                    .handle(UpdateActivityStatusCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.activity)?), result.receipt)
            }
            Operation::DeleteActivity => {
                let result = self
                    .delete_activity
                    .handle(DeleteActivityCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(None, result.receipt)
            }
            Operation::FundProject => {
                let result = self
                    .fund_project
                    .handle(FundProjectCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput::written(Some(to_payload(&result.project)?), result.receipt)
            }
            Operation::SubmitProof => {
                self.submit_proof
                    .handle(SubmitProofCommand::try_from(args)?, metadata)
                    .await?;
                InvocationOutput {
                    payload: None,
                    receipt: None,
                }
            }
            Operation::Query => {
                let records = self
                    .query_records
                    .handle(QueryRecordsQuery::from(args))
                    .await?;
                InvocationOutput::read(to_payload(&records)?)
            }
            Operation::QueryAll => {
                let records = self
                    .query_all
                    .handle(QueryAllQuery::try_from(args)?)
                    .await?;
                InvocationOutput::read(Value::Array(records))
            }
            Operation::GetHistory => {
                let entries = self
                    .get_history
                    .handle(GetHistoryQuery::from(args))
                    .await?;
                InvocationOutput::read(to_payload(&entries)?)
            }
        };
        Ok(output)
    }
}

fn to_payload<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    Ok(serde_json::to_value(value)?)
}

//! Named operations of the ledger invocation surface.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Every operation the ledger accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddProject,
    UpdateProject,
    UpdateProjectStatus,
    DeleteProject,
    AddMilestone,
    UpdateMilestone,
    UpdateMilestoneStatus,
    DeleteMilestone,
    AddActivity,
    UpdateActivity,
    UpdateActivityStatus,
    DeleteActivity,
    FundProject,
    SubmitProof,
    Query,
    QueryAll,
    GetHistory,
}

impl Operation {
    pub const ALL: [Operation; 17] = [
        Operation::AddProject,
        Operation::UpdateProject,
        Operation::UpdateProjectStatus,
        Operation::DeleteProject,
        Operation::AddMilestone,
        Operation::UpdateMilestone,
        Operation::UpdateMilestoneStatus,
        Operation::DeleteMilestone,
        Operation::AddActivity,
        Operation::UpdateActivity,
        Operation::UpdateActivityStatus,
        Operation::DeleteActivity,
        Operation::FundProject,
        Operation::SubmitProof,
        Operation::Query,
        Operation::QueryAll,
        Operation::GetHistory,
    ];

    /// PascalCase operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddProject => "AddProject",
            Operation::UpdateProject => "UpdateProject",
            Operation::UpdateProjectStatus => "UpdateProjectStatus",
            Operation::DeleteProject => "DeleteProject",
            Operation::AddMilestone => "AddMilestone",
            Operation::UpdateMilestone => "UpdateMilestone",
            Operation::UpdateMilestoneStatus => "UpdateMilestoneStatus",
            Operation::DeleteMilestone => "DeleteMilestone",
            Operation::AddActivity => "AddActivity",
            Operation::UpdateActivity => "UpdateActivity",
            Operation::UpdateActivityStatus => "UpdateActivityStatus",
            Operation::DeleteActivity => "DeleteActivity",
            Operation::FundProject => "FundProject",
            Operation::SubmitProof => "SubmitProof",
            Operation::Query => "Query",
            Operation::QueryAll => "QueryAll",
            Operation::GetHistory => "GetHistory",
        }
    }

    /// Exact number of positional arguments.
    pub fn arity(&self) -> usize {
        match self {
            Operation::AddProject | Operation::UpdateProject => 23,
            Operation::UpdateProjectStatus => 6,
            Operation::DeleteProject => 1,
            Operation::AddMilestone => 10,
            Operation::UpdateMilestone => 8,
            Operation::UpdateMilestoneStatus => 6,
            Operation::DeleteMilestone => 3,
            Operation::AddActivity => 18,
            Operation::UpdateActivity => 16,
            Operation::UpdateActivityStatus => 7,
            Operation::DeleteActivity => 4,
            Operation::FundProject => 3,
            Operation::SubmitProof => 6,
            Operation::Query | Operation::QueryAll | Operation::GetHistory => 1,
        }
    }

    /// Whether the operation only reads.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Operation::Query | Operation::QueryAll | Operation::GetHistory
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    /// Accepts `AddProject` as well as `addProject`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let pascal: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self::ALL
            .into_iter()
            .find(|op| op.name() == pascal)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UnknownOperation,
                    format!("Received unknown invoke function name - '{}'", s),
                )
                .with_detail("function", s)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pascal_and_lower_camel_names() {
        assert_eq!("FundProject".parse::<Operation>().unwrap(), Operation::FundProject);
        assert_eq!("fundProject".parse::<Operation>().unwrap(), Operation::FundProject);
        assert_eq!("getHistory".parse::<Operation>().unwrap(), Operation::GetHistory);
    }

    #[test]
    fn unknown_name_is_unknown_operation() {
        for name in ["", "addFoundation", "ADDPROJECT", "add_project"] {
            let err = name.parse::<Operation>().unwrap_err();
            assert_eq!(err.code, ErrorCode::UnknownOperation, "{name}");
        }
    }

    #[test]
    fn names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn only_queries_are_read_only() {
        let read_only: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(Operation::is_read_only)
            .collect();
        assert_eq!(
            read_only,
            vec![Operation::Query, Operation::QueryAll, Operation::GetHistory]
        );
    }
}

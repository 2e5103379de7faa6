//! Positional argument layouts of every operation.
//!
//! Each `TryFrom<&Arguments>` assumes the arity was already checked.

use crate::application::handlers::{
    AddActivityCommand, AddMilestoneCommand, AddProjectCommand, DeleteActivityCommand,
    DeleteMilestoneCommand, DeleteProjectCommand, FundProjectCommand, GetHistoryQuery,
    QueryAllQuery, QueryRecordsQuery, SubmitProofCommand, UpdateActivityCommand,
    UpdateActivityStatusCommand, UpdateMilestoneCommand, UpdateMilestoneStatusCommand,
    UpdateProjectCommand, UpdateProjectStatusCommand,
};
use crate::domain::activity::{ActivityDetails, ActivityStatusUpdate};
use crate::domain::foundation::{DocType, DomainError, EntityKey};
use crate::domain::milestone::MilestoneDetails;
use crate::domain::project::{Location, ProjectDetails, ProjectStatusUpdate};

use super::Arguments;

// ════════════════════════════════════════════════════════════════════════════
// Projects
// ════════════════════════════════════════════════════════════════════════════

/// Positions 1..=22 of add/update project.
fn project_details(args: &Arguments) -> Result<ProjectDetails, DomainError> {
    Ok(ProjectDetails {
        organization: args.text(1),
        ngo_company: args.text(2),
        project_name: args.text(3),
        fund_goal: args.amount(4),
        project_type: args.text(5),
        start_date: args.text(6),
        end_date: args.text(7),
        description: args.text(8),
        currency: args.text(9),
        fund_raised: args.amount(10),
        fund_allocated: args.amount(11),
        project_budget: args.amount(12),
        project_owner: args.text(13),
        fund_allocation_type: args.parse(14)?,
        is_published: args.flag(15),
        status: args.parse(16)?,
        flag: args.text(17),
        sdg: args.string_list(18),
        location: Location {
            latitude: args.text(19),
            longitude: args.text(20),
        },
        country: args.text(21),
        fund_not_allocated: args.amount(22),
    })
}

impl TryFrom<&Arguments> for AddProjectCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
            details: project_details(args)?,
        })
    }
}

impl TryFrom<&Arguments> for UpdateProjectCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
            details: project_details(args)?,
        })
    }
}

impl TryFrom<&Arguments> for UpdateProjectStatusCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
            update: ProjectStatusUpdate {
                status: args.parse(1)?,
                flag: args.text(2),
                is_published: args.flag(3),
                is_approved: args.flag(4),
                remarks: args.text(5),
            },
        })
    }
}

impl TryFrom<&Arguments> for DeleteProjectCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Milestones
// ════════════════════════════════════════════════════════════════════════════

/// Name, dates, description and status starting at `from`.
fn milestone_details(args: &Arguments, from: usize) -> Result<MilestoneDetails, DomainError> {
    Ok(MilestoneDetails {
        milestone_name: args.text(from),
        start_date: args.text(from + 1),
        end_date: args.text(from + 2),
        description: args.text(from + 3),
        status: args.parse(from + 4)?,
    })
}

impl TryFrom<&Arguments> for AddMilestoneCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
            milestone_id: args.milestone_id(1)?,
            details: milestone_details(args, 2)?,
            is_approved: args.flag(7),
            project_status: args.parse(8)?,
            project_flag: args.text(9),
        })
    }
}

impl TryFrom<&Arguments> for UpdateMilestoneCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            milestone_id: args.milestone_id(0)?,
            details: milestone_details(args, 1)?,
            project_status: args.parse(6)?,
            project_flag: args.text(7),
        })
    }
}

impl TryFrom<&Arguments> for UpdateMilestoneStatusCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            milestone_id: args.milestone_id(0)?,
            status: args.parse(1)?,
            is_approved: args.flag(2),
            project_status: args.parse(3)?,
            project_flag: args.text(4),
            project_is_approved: args.flag(5),
        })
    }
}

impl TryFrom<&Arguments> for DeleteMilestoneCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            milestone_id: args.milestone_id(0)?,
            project_status: args.parse(1)?,
            project_flag: args.text(2),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Activities
// ════════════════════════════════════════════════════════════════════════════

/// The twelve activity fields starting at `from` (activity name).
fn activity_details(args: &Arguments, from: usize) -> Result<ActivityDetails, DomainError> {
    Ok(ActivityDetails {
        activity_name: args.text(from),
        start_date: args.text(from + 1),
        end_date: args.text(from + 2),
        activity_budget: args.amount(from + 3),
        description: args.text(from + 4),
        secondary_validation: args.flag(from + 5),
        remarks: args.text(from + 6),
        is_approved: args.flag(from + 7),
        validator_id: args.text(from + 8),
        status: args.parse(from + 9)?,
        technical_criteria: args.text(from + 10),
        financial_criteria: args.text(from + 11),
    })
}

impl TryFrom<&Arguments> for AddActivityCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
            milestone_id: args.milestone_id(1)?,
            activity_id: args.activity_id(2)?,
            details: activity_details(args, 3)?,
            milestone_status: args.parse(15)?,
            project_status: args.parse(16)?,
            project_flag: args.text(17),
        })
    }
}

impl TryFrom<&Arguments> for UpdateActivityCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            activity_id: args.activity_id(0)?,
            details: activity_details(args, 1)?,
            milestone_status: args.parse(13)?,
            project_status: args.parse(14)?,
            project_flag: args.text(15),
        })
    }
}

impl TryFrom<&Arguments> for UpdateActivityStatusCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            activity_id: args.activity_id(0)?,
            update: ActivityStatusUpdate {
                status: args.parse(1)?,
                is_approved: args.flag(2),
                remarks: args.text(3),
            },
            milestone_status: args.parse(4)?,
            project_status: args.parse(5)?,
            project_flag: args.text(6),
        })
    }
}

impl TryFrom<&Arguments> for DeleteActivityCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            activity_id: args.activity_id(0)?,
            milestone_status: args.parse(1)?,
            project_status: args.parse(2)?,
            project_flag: args.text(3),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Funding
// ════════════════════════════════════════════════════════════════════════════

impl TryFrom<&Arguments> for FundProjectCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
            amount: args.amount(1),
            flag: args.text(2),
        })
    }
}

impl TryFrom<&Arguments> for SubmitProofCommand {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: args.project_id(0)?,
            milestone_id: args.milestone_id(1)?,
            activity_id: args.activity_id(2)?,
            proof_reference: args.text(3),
            fund_requested: args.amount(4),
            remarks: args.text(5),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Queries
// ════════════════════════════════════════════════════════════════════════════

impl From<&Arguments> for QueryRecordsQuery {
    fn from(args: &Arguments) -> Self {
        Self { query: args.text(0) }
    }
}

impl TryFrom<&Arguments> for QueryAllQuery {
    type Error = DomainError;

    fn try_from(args: &Arguments) -> Result<Self, Self::Error> {
        let raw = args.text(0);
        let doc_type = DocType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| {
                DomainError::invalid_argument(
                    "doc_type",
                    format!("Unknown docType '{}'; expected Project, Milestone or Activity", raw),
                )
            })?;
        Ok(Self { doc_type })
    }
}

impl From<&Arguments> for GetHistoryQuery {
    fn from(args: &Arguments) -> Self {
        Self {
            key: EntityKey::parse(&args.text(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::ActivityStatus;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::milestone::MilestoneStatus;
    use crate::domain::project::{FundAllocationType, ProjectStatus};

    fn args(values: &[&str]) -> Arguments {
        Arguments::sanitize(values.iter().map(|v| v.to_string()).collect(), 2000).unwrap()
    }

    #[test]
    fn project_layout() {
        let args = args(&[
            "P1", "org-1", "Clean Water NGO", "Village wells", "10000", "water", "2024-01-01",
            "2024-12-31", "Drill wells", "USD", "0", "0", "9000", "ngo-7", "2", "true", "Draft",
            "new", r#"["SDG6","SDG3"]"#, "12.97", "77.59", "IN", "50",
        ]);

        let cmd = AddProjectCommand::try_from(&args).unwrap();

        assert_eq!(cmd.project_id.as_str(), "P1");
        assert_eq!(cmd.details.fund_goal, 10_000.0);
        assert_eq!(cmd.details.fund_allocation_type, FundAllocationType::Automatic);
        assert!(cmd.details.is_published);
        assert_eq!(cmd.details.status, ProjectStatus::Draft);
        assert_eq!(cmd.details.sdg, vec!["SDG6".to_string(), "SDG3".to_string()]);
        assert_eq!(cmd.details.location.longitude, "77.59");
        assert_eq!(cmd.details.country, "IN");
        assert_eq!(cmd.details.fund_not_allocated, 50.0);
    }

    #[test]
    fn activity_layout() {
        let args = args(&[
            "P1", "M1", "A1", "Drill", "2024-02-01", "2024-02-28", "400", "First borehole",
            "false", "none", "1", "validator-1", "Approved", "depth", "quotes", "In Progress",
            "Published", "executing",
        ]);

        let cmd = AddActivityCommand::try_from(&args).unwrap();

        assert_eq!(cmd.activity_id.as_str(), "A1");
        assert_eq!(cmd.details.activity_budget, 400.0);
        assert!(cmd.details.is_approved);
        assert_eq!(cmd.details.status, ActivityStatus::Approved);
        assert_eq!(cmd.details.financial_criteria, "quotes");
        assert_eq!(cmd.milestone_status, MilestoneStatus::InProgress);
        assert_eq!(cmd.project_flag, "executing");
    }

    #[test]
    fn unknown_status_is_invalid_argument() {
        let args = args(&["M1", "Finished", "true", "Draft", "f", "false"]);

        let err = UpdateMilestoneStatusCommand::try_from(&args).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn query_all_requires_known_doc_type() {
        assert_eq!(
            QueryAllQuery::try_from(&args(&["Milestone"])).unwrap().doc_type,
            DocType::Milestone
        );
        assert!(QueryAllQuery::try_from(&args(&["Donor"])).is_err());
    }
}

//! Positional argument list of one invocation.

use std::str::FromStr;

use crate::domain::foundation::{
    parse_amount, parse_flag, parse_string_list, ActivityId, DomainError, MilestoneId, ProjectId,
    ValidationError,
};

/// Sanitized positional arguments.
///
/// Every argument is non-empty and at most the configured number of
/// characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<String>,
}

impl Arguments {
    /// Checks every argument's length.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` naming the first offending position
    pub fn sanitize(values: Vec<String>, max_length: usize) -> Result<Self, DomainError> {
        for (position, value) in values.iter().enumerate() {
            let field = format!("args[{}]", position);
            if value.is_empty() {
                return Err(ValidationError::empty_field(field).into());
            }
            let length = value.chars().count();
            if length > max_length {
                return Err(ValidationError::too_long(field, max_length, length).into());
            }
        }
        Ok(Self { values })
    }

    /// Checks the argument count.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if there are not exactly `arity` arguments
    pub fn expect_arity(&self, arity: usize) -> Result<(), DomainError> {
        if self.values.len() != arity {
            return Err(DomainError::invalid_argument(
                "args",
                format!("Incorrect number of arguments. Expecting {}", arity),
            )
            .with_detail("actual", self.values.len().to_string()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument at `position` as text. Positions are checked by arity first.
    pub fn text(&self, position: usize) -> String {
        self.values.get(position).cloned().unwrap_or_default()
    }

    pub fn amount(&self, position: usize) -> f64 {
        parse_amount(&self.text(position))
    }

    pub fn flag(&self, position: usize) -> bool {
        parse_flag(&self.text(position))
    }

    pub fn string_list(&self, position: usize) -> Vec<String> {
        parse_string_list(&self.text(position))
    }

    /// Strictly parses an enumerated field.
    pub fn parse<T>(&self, position: usize) -> Result<T, DomainError>
    where
        T: FromStr<Err = ValidationError>,
    {
        Ok(self.text(position).parse::<T>()?)
    }

    pub fn project_id(&self, position: usize) -> Result<ProjectId, DomainError> {
        Ok(ProjectId::new(self.text(position))?)
    }

    pub fn milestone_id(&self, position: usize) -> Result<MilestoneId, DomainError> {
        Ok(MilestoneId::new(self.text(position))?)
    }

    pub fn activity_id(&self, position: usize) -> Result<ActivityId, DomainError> {
        Ok(ActivityId::new(self.text(position))?)
    }
}

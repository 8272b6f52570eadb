use serde::Deserialize;

use crate::db::models::professor::Professor;
use crate::db::queries::ProfessorFilter;
use crate::utils::validation::{self, Field, FieldErrors, WriteMode};

/// Department value the dashboard sends to mean "no department filter".
const ALL_DEPARTMENTS: &str = "all";

/// Body of a professor write. Only the flat fields are read; nested
/// `academics` and `publications` keys are ignored.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ProfessorPayload {
    /// Employee code; only accepted on create.
    pub employee_code: Field,
    /// Full name.
    pub name: Field,
    /// Contact email.
    pub email: Field,
    /// Department.
    pub department: Field,
}

impl ProfessorPayload {
    /// Check the payload against the field constraints and produce the
    /// record to store.
    ///
    /// # Errors
    /// Errors with every failed field.
    pub fn validate(self, mode: WriteMode<'_, Professor>) -> Result<Professor, FieldErrors> {
        let mut errors = FieldErrors::default();
        let fallback = mode.fallback();
        let employee_code = validation::primary_key(
            &mut errors,
            "employee_code",
            self.employee_code,
            mode.existing().map(|stored| stored.employee_code.as_str()),
            20,
        );
        let name = validation::text(
            &mut errors,
            "name",
            self.name,
            fallback.map(|stored| stored.name.as_str()),
            100,
        );
        let email = validation::email(
            &mut errors,
            "email",
            self.email,
            fallback.map(|stored| stored.email.as_str()),
        );
        let department = validation::text(
            &mut errors,
            "department",
            self.department,
            fallback.map(|stored| stored.department.as_str()),
            50,
        );
        match (employee_code, name, email, department) {
            (Some(employee_code), Some(name), Some(email), Some(department))
                if errors.is_empty() =>
            {
                Ok(Professor {
                    employee_code,
                    name,
                    email,
                    department,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Query string of the professor listing.
#[derive(Deserialize, Debug, Default)]
pub struct ProfessorQuery {
    /// Lower bound of the publication date range, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Upper bound of the publication date range, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Department to restrict the listing to.
    pub department: Option<String>,
}

impl ProfessorQuery {
    /// Build the listing filter.
    ///
    /// The date range only takes effect when `date_filter_enabled` is set
    /// and both bounds are given; otherwise the bounds are ignored.
    ///
    /// # Errors
    /// Errors if the date filter is enabled and a bound is not a valid date.
    pub fn into_filter(self, date_filter_enabled: bool) -> Result<ProfessorFilter, FieldErrors> {
        let mut errors = FieldErrors::default();
        let start_date = self.start_date.filter(|value| !value.is_empty());
        let end_date = self.end_date.filter(|value| !value.is_empty());
        let publication_date_range = match (start_date, end_date) {
            (Some(start), Some(end)) if date_filter_enabled => {
                let start = validation::date(&mut errors, "start_date", Field::from(start), None);
                let end = validation::date(&mut errors, "end_date", Field::from(end), None);
                start.zip(end)
            }
            (Some(_), _) | (_, Some(_)) => {
                tracing::debug!("Publication date range given but not applied");
                None
            }
            (None, None) => None,
        };
        let department = self
            .department
            .filter(|value| !value.is_empty() && value != ALL_DEPARTMENTS);
        errors.into_result()?;
        Ok(ProfessorFilter {
            publication_date_range,
            department,
        })
    }
}

use chrono::{NaiveDate, Utc};

use super::types::{CreateEmployeeRequest, UpdateEmployeeRequest};
use super::ApiError;
use crate::risk::age_on;

const MIN_HIRING_AGE: i32 = 18;
const MAX_HIRING_AGE: i32 = 80;

pub fn validate_employee_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid employee ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

fn validate_name_field(field: &str, value: &str) -> Result<(), ApiError> {
    let len = value.trim().chars().count();
    if !(2..=100).contains(&len) {
        return Err(ApiError::validation(format!(
            "{field} must be between 2 and 100 characters"
        )));
    }
    Ok(())
}

/// Syntactic plausibility only; deliverability is not this layer's problem.
fn validate_email_format(email: &str) -> Result<(), ApiError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ApiError::validation("Must be a valid email"));
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(ApiError::validation("Must be a valid email"));
    }

    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ApiError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));

    if !allowed || !(7..=20).contains(&digits) {
        return Err(ApiError::validation("Must be a valid phone number"));
    }
    Ok(())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::validation(format!("{field} must be a valid date (YYYY-MM-DD)"))
    })
}

fn validate_birth_date(value: &str) -> Result<(), ApiError> {
    let birth = parse_date("birthDate", value)?;
    let age = age_on(birth, Utc::now().date_naive());

    if !(MIN_HIRING_AGE..=MAX_HIRING_AGE).contains(&age) {
        return Err(ApiError::validation(format!(
            "Age must be between {MIN_HIRING_AGE} and {MAX_HIRING_AGE} years"
        )));
    }
    Ok(())
}

fn validate_hire_date(value: &str) -> Result<(), ApiError> {
    let hired = parse_date("hireDate", value)?;

    if hired > Utc::now().date_naive() {
        return Err(ApiError::validation("Hire date cannot be in the future"));
    }
    Ok(())
}

fn validate_salary(salary: f64) -> Result<(), ApiError> {
    if !salary.is_finite() || salary <= 0.0 {
        return Err(ApiError::validation("Salary must be a positive number"));
    }
    Ok(())
}

fn validate_catalog_id(field: &str, id: i32) -> Result<(), ApiError> {
    if id < 1 {
        return Err(ApiError::validation(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(())
}

fn validate_employee_number(number: &str) -> Result<(), ApiError> {
    let len = number.chars().count();
    if !(3..=20).contains(&len) {
        return Err(ApiError::validation(
            "Employee number must be between 3 and 20 characters",
        ));
    }
    Ok(())
}

pub fn validate_create(input: &CreateEmployeeRequest) -> Result<(), ApiError> {
    validate_name_field("name", &input.name)?;
    validate_name_field("surnames", &input.surnames)?;
    validate_email_format(&input.email)?;
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    validate_birth_date(&input.birth_date)?;
    validate_hire_date(&input.hire_date)?;
    validate_salary(input.salary)?;
    validate_catalog_id("sexId", input.sex_id)?;
    validate_catalog_id("professionId", input.profession_id)?;
    validate_catalog_id("maritalStatusId", input.marital_status_id)?;
    validate_catalog_id("areaId", input.area_id)?;
    Ok(())
}

pub fn validate_patch(input: &UpdateEmployeeRequest) -> Result<(), ApiError> {
    if let Some(number) = &input.employee_number {
        validate_employee_number(number)?;
    }
    if let Some(name) = &input.name {
        validate_name_field("name", name)?;
    }
    if let Some(surnames) = &input.surnames {
        validate_name_field("surnames", surnames)?;
    }
    if let Some(email) = &input.email {
        validate_email_format(email)?;
    }
    if let Some(Some(phone)) = &input.phone {
        validate_phone(phone)?;
    }
    if let Some(birth_date) = &input.birth_date {
        validate_birth_date(birth_date)?;
    }
    if let Some(hire_date) = &input.hire_date {
        validate_hire_date(hire_date)?;
    }
    if let Some(salary) = input.salary {
        validate_salary(salary)?;
    }
    if let Some(id) = input.sex_id {
        validate_catalog_id("sexId", id)?;
    }
    if let Some(id) = input.profession_id {
        validate_catalog_id("professionId", id)?;
    }
    if let Some(id) = input.marital_status_id {
        validate_catalog_id("maritalStatusId", id)?;
    }
    if let Some(id) = input.area_id {
        validate_catalog_id("areaId", id)?;
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    validate_email_format(email)?;

    if password.chars().count() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            name: "Ana".to_string(),
            surnames: "García López".to_string(),
            email: "ana.garcia@example.com".to_string(),
            phone: Some("+52 555 010 0000".to_string()),
            birth_date: "1990-05-20".to_string(),
            hire_date: "2020-01-15".to_string(),
            salary: 1500.0,
            sex_id: 1,
            profession_id: 1,
            marital_status_id: 1,
            area_id: 1,
        }
    }

    #[test]
    fn test_validate_employee_id() {
        assert!(validate_employee_id(1).is_ok());
        assert!(validate_employee_id(12345).is_ok());
        assert!(validate_employee_id(0).is_err());
        assert!(validate_employee_id(-1).is_err());
    }

    #[test]
    fn test_validate_create_accepts_well_formed_input() {
        assert!(validate_create(&create_request()).is_ok());
    }

    #[test]
    fn test_validate_create_rejects_bad_fields() {
        let mut input = create_request();
        input.name = "A".to_string();
        assert!(validate_create(&input).is_err());

        let mut input = create_request();
        input.email = "not-an-email".to_string();
        assert!(validate_create(&input).is_err());

        let mut input = create_request();
        input.salary = 0.0;
        assert!(validate_create(&input).is_err());

        let mut input = create_request();
        input.salary = f64::NAN;
        assert!(validate_create(&input).is_err());

        let mut input = create_request();
        input.hire_date = "2999-01-01".to_string();
        assert!(validate_create(&input).is_err());

        let mut input = create_request();
        input.birth_date = "2020-01-01".to_string(); // too young
        assert!(validate_create(&input).is_err());

        let mut input = create_request();
        input.area_id = 0;
        assert!(validate_create(&input).is_err());
    }

    #[test]
    fn test_validate_patch_checks_only_present_fields() {
        assert!(validate_patch(&UpdateEmployeeRequest::default()).is_ok());

        let patch = UpdateEmployeeRequest {
            salary: Some(-1.0),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());

        let patch = UpdateEmployeeRequest {
            employee_number: Some("AB".to_string()),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());

        // phone supplied as null clears the field and needs no format check
        let patch = UpdateEmployeeRequest {
            phone: Some(None),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_ok());
    }

    #[test]
    fn test_validate_login() {
        assert!(validate_login("admin@colaboradores.com", "admin123").is_ok());
        assert!(validate_login("admin@colaboradores.com", "short").is_err());
        assert!(validate_login("nope", "admin123").is_err());
    }
}

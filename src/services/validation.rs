use crate::error::FieldError;

pub const PROJECT_NAME_MAX: usize = 100;
pub const PROJECT_DESCRIPTION_MAX: usize = 500;
pub const TASK_TITLE_MAX: usize = 100;
pub const TASK_DESCRIPTION_MAX: usize = 1000;

/// Checks a text field that must be non-blank and at most `max` characters.
/// Titles and names are stored trimmed; descriptions are stored as given.
pub fn text(
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
    trim: bool,
) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, format!("{label} is required")));
    }
    let kept = if trim { trimmed } else { value };
    if kept.chars().count() > max {
        return Err(FieldError::new(
            field,
            format!("{label} cannot be more than {max} characters"),
        ));
    }
    Ok(kept.to_string())
}

/// Like [`text`], but also rejects an absent value.
pub fn required_text(
    field: &'static str,
    label: &str,
    value: Option<&str>,
    max: usize,
    trim: bool,
) -> Result<String, FieldError> {
    match value {
        Some(v) => text(field, label, v, max, trim),
        None => Err(FieldError::new(field, format!("{label} is required"))),
    }
}

/// Rejects an explicit `null` for a field that cannot be cleared.
pub fn not_null<T>(field: &'static str, label: &str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or_else(|| FieldError::new(field, format!("{label} is required")))
}

/// Accumulates field errors so a request reports every bad field at once.
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_and_missing() {
        assert!(text("name", "Name", "   ", 100, true).is_err());
        let err = required_text("name", "Name", None, 100, true).unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "Name is required");
    }

    #[test]
    fn enforces_length_in_characters() {
        let at_limit = "é".repeat(100);
        assert!(text("name", "Name", &at_limit, 100, true).is_ok());

        let over = "a".repeat(101);
        let err = text("name", "Name", &over, 100, true).unwrap_err();
        assert_eq!(err.message, "Name cannot be more than 100 characters");
    }

    #[test]
    fn trims_only_when_asked() {
        assert_eq!(text("name", "Name", "  Launch ", 100, true).unwrap(), "Launch");
        assert_eq!(
            text("description", "Description", " v1 launch ", 500, false).unwrap(),
            " v1 launch "
        );
    }

    #[test]
    fn null_is_rejected_for_required_fields() {
        assert_eq!(not_null("priority", "Priority", Some(3)), Ok(3));
        let err = not_null::<u8>("status", "Status", None).unwrap_err();
        assert_eq!(err, FieldError::new("status", "Status is required"));
    }

    #[test]
    fn checker_collects_all_errors() {
        let mut checker = Checker::new();
        checker.check(required_text("name", "Name", None, 100, true));
        checker.check(required_text("description", "Description", Some(""), 500, false));
        let ok = checker.check(required_text("title", "Title", Some("fine"), 100, true));
        assert_eq!(ok.as_deref(), Some("fine"));

        let errors = checker.finish().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "description"]);
    }
}

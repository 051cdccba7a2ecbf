use serde::Deserialize;

use crate::models::Role;

pub const MIN_HOURLY_RATE: f64 = 15.0;

/// Registration form as submitted by the client. Only the fields checked by
/// [`registration`] are required; contact details are passed through as-is.
#[derive(Debug, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "crate::de::lenient_rate")]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Additive strength score in `0..=5`. Each heuristic counts one point and
/// the sixth point is clamped away, keeping the scale at five steps.
pub fn strength(password: &str) -> u8 {
    let mut score = 0;

    if password.chars().count() >= 8 {
        score += 1;
    }
    if password.chars().count() >= 12 {
        score += 1;
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }

    score.min(5)
}

/// Runs every check in order and collects the violated ones. An empty list
/// means the form is valid. Checks never short-circuit, so the caller gets
/// the full picture in one pass.
pub fn registration(form: &Registration) -> Vec<&'static str> {
    let mut errors = Vec::new();

    if form.username.chars().count() < 3 {
        errors.push("Username must be at least 3 characters");
    }

    if !email(&form.email) {
        errors.push("Please enter a valid email address");
    }

    if form.password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters");
    }

    if form.password != form.confirm_password {
        errors.push("Passwords do not match");
    }

    if form.role == Role::Technician {
        if form.service_type.as_deref().is_none_or(str::is_empty) {
            errors.push("Please select a service type");
        }

        if !form.hourly_rate.is_some_and(|rate| rate >= MIN_HOURLY_RATE) {
            errors.push("Hourly rate must be at least $15");
        }
    }

    errors
}

pub fn email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && !host.is_empty()
        && !tld.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(role: Role) -> Registration {
        Registration {
            username: "marcy".to_owned(),
            email: "marcy@example.com".to_owned(),
            password: "hunter2hunter2".to_owned(),
            confirm_password: "hunter2hunter2".to_owned(),
            role,
            service_type: None,
            hourly_rate: None,
            phone: String::new(),
            address: String::new(),
            description: String::new(),
            skills: Vec::new(),
        }
    }

    #[test]
    fn strength_empty() {
        assert_eq!(0, strength(""));
    }

    #[test]
    fn strength_single_class() {
        assert_eq!(2, strength("aaaaaaaa"));
        assert_eq!(2, strength("AAAAAAAA"));
        assert_eq!(2, strength("11111111"));
    }

    #[test]
    fn strength_clamped() {
        // All six heuristics hold, but the scale stops at 5.
        assert_eq!(5, strength("Aa1!aaaaaaaa"));
        assert_eq!(5, strength("Aa1!aaaaaaaaaaaaaaaaaaaaaaaa"));
    }

    #[test]
    fn strength_grows_with_new_classes() {
        let steps = ["a", "aaaaaaaa", "aaaaaaaA", "aaaaaaaA1", "aaaaaaaA1!"];
        let scores = steps.map(strength);

        for pair in scores.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(scores.iter().all(|&s| s <= 5));
    }

    #[test]
    fn strength_counts_chars_not_bytes() {
        // Two-byte characters still count once towards the length rules.
        assert_eq!(2, strength("éééééééé"));
    }

    #[test]
    fn registration_valid_customer() {
        assert!(registration(&form(Role::Customer)).is_empty());
    }

    #[test]
    fn registration_all_generic_failures_in_order() {
        let form = Registration {
            username: "ab".to_owned(),
            email: "bad".to_owned(),
            password: "short".to_owned(),
            confirm_password: "x".to_owned(),
            ..form(Role::Customer)
        };

        assert_eq!(
            vec![
                "Username must be at least 3 characters",
                "Please enter a valid email address",
                "Password must be at least 8 characters",
                "Passwords do not match",
            ],
            registration(&form),
        );
    }

    #[test]
    fn registration_technician_checks_appended() {
        let form = Registration {
            hourly_rate: Some(10.0),
            ..form(Role::Technician)
        };

        assert_eq!(
            vec![
                "Please select a service type",
                "Hourly rate must be at least $15",
            ],
            registration(&form),
        );
    }

    #[test]
    fn registration_technician_empty_service_type() {
        let form = Registration {
            service_type: Some(String::new()),
            hourly_rate: Some(15.0),
            ..form(Role::Technician)
        };

        assert_eq!(vec!["Please select a service type"], registration(&form));
    }

    #[test]
    fn registration_technician_valid() {
        let form = Registration {
            service_type: Some("Plumbing".to_owned()),
            hourly_rate: Some(15.0),
            ..form(Role::Technician)
        };

        assert!(registration(&form).is_empty());
    }

    #[test]
    fn registration_rate_nan_rejected() {
        let form = Registration {
            service_type: Some("Plumbing".to_owned()),
            hourly_rate: Some(f64::NAN),
            ..form(Role::Technician)
        };

        assert_eq!(
            vec!["Hourly rate must be at least $15"],
            registration(&form),
        );
    }

    #[test]
    fn registration_idempotent() {
        let form = Registration {
            username: "ab".to_owned(),
            ..form(Role::Technician)
        };

        assert_eq!(registration(&form), registration(&form));
    }

    #[test]
    fn email_accepts_conventional_addresses() {
        assert!(email("a@b.co"));
        assert!(email("first.last@mail.example.org"));
        assert!(email("tech+tag@example.io"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(!email(""));
        assert!(!email("plain"));
        assert!(!email("no-at.example.com"));
        assert!(!email("@example.com"));
        assert!(!email("user@"));
        assert!(!email("user@domain"));
        assert!(!email("user@.com"));
        assert!(!email("user@domain."));
        assert!(!email("user@@domain.com"));
        assert!(!email("us er@domain.com"));
    }
}

//! Field rules for account requests.
//!
//! Two rule sets live here:
//! - the login gate, enforced by the server on every login before storage is
//!   touched (length bounds only);
//! - the form rules the web client applies before submitting (character
//!   classes, password strength, confirmation). Signup only runs them on the
//!   server when `auth.enforce_signup_rules` is set.
//!
//! The gate caps passwords at 10 characters while the form rule has no upper
//! bound, so a password accepted at signup can be refused at login.

use serde::Serialize;

use super::domain::{LoginInput, SignupInput};

pub const USERNAME_LENGTH_ERROR: &str = "Username length error";
pub const PASSWORD_LENGTH_ERROR: &str = "Password length 8-10";
pub const USERNAME_EMPTY: &str = "Username should not be empty";
pub const PASSWORD_EMPTY: &str = "Password should not be empty";
pub const NAME_EMPTY: &str = "Name should not be empty";
pub const USERNAME_PATTERN_ERROR: &str =
    "Username must be between 3 and 30 characters and can contain letters, numbers, and underscores";
pub const PASSWORD_PATTERN_ERROR: &str =
    "Password must contain at least one uppercase letter, one lowercase letter, and one digit, and be 8 characters long";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";

pub const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=30;
pub const GATE_PASSWORD_LEN: std::ops::RangeInclusive<usize> = 8..=10;
const FORM_PASSWORD_MIN: usize = 8;

/// One failed field, shaped like the `errors[]` entries the web client already parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub msg: String,
    pub path: String,
    pub location: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a failure. Password values are never echoed back.
    pub fn push(&mut self, path: &str, value: Option<&str>, msg: &str) {
        self.errors.push(FieldError {
            kind: "field",
            value: value.map(str::to_string),
            msg: msg.to_string(),
            path: path.to_string(),
            location: "body",
        });
    }

    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.path == path).map(|e| e.msg.as_str())
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// `^[a-zA-Z0-9_]{3,30}$`
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_LEN.contains(&char_len(username))
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// ASCII letters and digits only, at least 8 long, with a digit, a lowercase and an uppercase letter.
pub fn is_strong_password(password: &str) -> bool {
    char_len(password) >= FORM_PASSWORD_MIN
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
}

/// Server-side login gate: length bounds only, evaluated before any lookup.
pub fn login_gate(input: &LoginInput) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();
    if !USERNAME_LEN.contains(&char_len(&input.username)) {
        errs.push("username", Some(&input.username), USERNAME_LENGTH_ERROR);
    }
    if !GATE_PASSWORD_LEN.contains(&char_len(&input.password)) {
        errs.push("password", None, PASSWORD_LENGTH_ERROR);
    }
    errs.into_result()
}

/// Rules the login form applies before submitting.
pub fn validate_login_form(input: &LoginInput) -> ValidationErrors {
    let mut errs = ValidationErrors::default();
    if input.username.is_empty() {
        errs.push("username", Some(""), USERNAME_EMPTY);
    } else if !is_valid_username(&input.username) {
        errs.push("username", Some(&input.username), USERNAME_PATTERN_ERROR);
    }
    check_password(&mut errs, &input.password);
    errs
}

/// Rules the signup form applies before submitting. The username is only
/// checked for presence here; the character rule belongs to the login form.
pub fn validate_signup_form(input: &SignupInput) -> ValidationErrors {
    let mut errs = ValidationErrors::default();
    if input.name.is_empty() {
        errs.push("name", Some(""), NAME_EMPTY);
    }
    if input.username.is_empty() {
        errs.push("username", Some(""), USERNAME_EMPTY);
    }
    check_password(&mut errs, &input.password);
    if let Some(confirm) = &input.confirm_password {
        if confirm != &input.password {
            errs.push("confirmPassword", None, PASSWORDS_MUST_MATCH);
        }
    }
    errs
}

fn check_password(errs: &mut ValidationErrors, password: &str) {
    if password.is_empty() {
        errs.push("password", None, PASSWORD_EMPTY);
    } else if !is_strong_password(password) {
        errs.push("password", None, PASSWORD_PATTERN_ERROR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[test]
    fn gate_bounds_are_inclusive() {
        assert!(login_gate(&login("abc", "12345678")).is_ok());
        assert!(login_gate(&login(&"a".repeat(30), "1234567890")).is_ok());

        let errs = login_gate(&login("ab", "1234567")).unwrap_err();
        assert_eq!(errs.message_for("username"), Some(USERNAME_LENGTH_ERROR));
        assert_eq!(errs.message_for("password"), Some(PASSWORD_LENGTH_ERROR));

        let errs = login_gate(&login(&"a".repeat(31), "12345678901")).unwrap_err();
        assert_eq!(errs.errors.len(), 2);
    }

    #[test]
    fn gate_rejects_eleven_char_password() {
        // "Password12" is ten characters and sits on the upper bound
        assert!(login_gate(&login("bob", "Password12")).is_ok());

        let errs = login_gate(&login("bob", "Password123")).unwrap_err();
        assert_eq!(errs.errors.len(), 1);
        assert_eq!(errs.errors[0].path, "password");
        assert_eq!(errs.errors[0].value, None);
    }

    #[test]
    fn gate_counts_characters_not_bytes() {
        assert!(login_gate(&login("žžž", "ééééééééé")).is_ok());
    }

    #[test]
    fn gate_error_shape() {
        let errs = login_gate(&login("", "12345678")).unwrap_err();
        let json = serde_json::to_value(&errs).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"errors": [{
                "type": "field",
                "value": "",
                "msg": "Username length error",
                "path": "username",
                "location": "body"
            }]})
        );
    }

    #[test]
    fn username_pattern() {
        assert!(is_valid_username("map_user_01"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username("dash-name"));
        assert!(!is_valid_username(&"x".repeat(31)));
    }

    #[test]
    fn password_strength() {
        assert!(is_strong_password("Passw0rd"));
        assert!(is_strong_password("LongerPassword123456"));
        assert!(!is_strong_password("Passw0r"));
        assert!(!is_strong_password("password1"));
        assert!(!is_strong_password("PASSWORD1"));
        assert!(!is_strong_password("Password"));
        assert!(!is_strong_password("Passw0rd!"));
    }

    #[test]
    fn login_form_messages() {
        let errs = validate_login_form(&login("", ""));
        assert_eq!(errs.message_for("username"), Some(USERNAME_EMPTY));
        assert_eq!(errs.message_for("password"), Some(PASSWORD_EMPTY));

        let errs = validate_login_form(&login("a b", "weak"));
        assert_eq!(errs.message_for("username"), Some(USERNAME_PATTERN_ERROR));
        assert_eq!(errs.message_for("password"), Some(PASSWORD_PATTERN_ERROR));

        assert!(validate_login_form(&login("valid_user", "Passw0rd")).is_empty());
    }

    #[test]
    fn signup_form_messages() {
        let input = SignupInput {
            name: "".into(),
            username: "".into(),
            password: "Passw0rd".into(),
            confirm_password: Some("Passw0rd1".into()),
        };
        let errs = validate_signup_form(&input);
        assert_eq!(errs.message_for("name"), Some(NAME_EMPTY));
        assert_eq!(errs.message_for("username"), Some(USERNAME_EMPTY));
        assert_eq!(errs.message_for("password"), None);
        assert_eq!(errs.message_for("confirmPassword"), Some(PASSWORDS_MUST_MATCH));

        // signup form does not apply the username character rule
        let ok = SignupInput {
            name: "Ann".into(),
            username: "a b".into(),
            password: "Passw0rd".into(),
            confirm_password: None,
        };
        assert!(validate_signup_form(&ok).is_empty());
    }

    #[test]
    fn form_accepts_password_the_gate_refuses() {
        let long = "Passw0rdLonger";
        assert!(is_strong_password(long));
        assert!(login_gate(&login("someone", long)).is_err());
    }
}

use serde::{Deserialize, Deserializer, Serialize};

use super::validation::ValidationErrors;

/// Signup request. `confirm_password` is only sent by form clients.
///
/// The three columns are NOT NULL, so a missing or null field fails to
/// deserialize instead of storing an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupInput {
    #[serde(deserialize_with = "scalar_text")]
    pub name: String,
    #[serde(deserialize_with = "scalar_text")]
    pub username: String,
    #[serde(deserialize_with = "scalar_text")]
    pub password: String,
    #[serde(default, rename = "confirmPassword", skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

/// Login request. Missing or null fields count as empty strings and are
/// left for the length gate to report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub username: String,
    #[serde(default, deserialize_with = "optional_scalar_text")]
    pub password: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(v: Scalar) -> Self {
        match v {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Strings pass through; numbers and booleans become their text form.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

/// Like `scalar_text`, with `null` read as an empty string.
fn optional_scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from).unwrap_or_default())
}

/// Account as seen by callers; the password never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Created,
    UsernameTaken,
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Account),
    Rejected,
    Invalid(ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_fields_are_read_as_text() {
        let input: LoginInput = serde_json::from_str(r#"{"username":12345,"password":null}"#).unwrap();
        assert_eq!(input.username, "12345");
        assert_eq!(input.password, "");

        let input: LoginInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.username, "");
        assert_eq!(input.password, "");
    }

    #[test]
    fn signup_requires_every_column() {
        assert!(serde_json::from_str::<SignupInput>("{}").is_err());
        assert!(serde_json::from_str::<SignupInput>(r#"{"name":"A","username":null,"password":"Passw0rd"}"#).is_err());

        let input: SignupInput =
            serde_json::from_str(r#"{"name":"A","username":1001,"password":"Passw0rd","confirmPassword":"Passw0rd"}"#).unwrap();
        assert_eq!(input.username, "1001");
        assert_eq!(input.confirm_password.as_deref(), Some("Passw0rd"));
    }
}

//! Request bodies submitted to self-service flows.

use serde::Serialize;

const PASSWORD_METHOD: &str = "password";

/// Credentials submitted to a login flow.
#[derive(Debug, Serialize)]
pub struct LoginSubmission<'a> {
    method: &'static str,
    identifier: &'a str,
    password: &'a str,
}

impl<'a> LoginSubmission<'a> {
    #[must_use]
    pub fn new(identifier: &'a str, password: &'a str) -> Self {
        Self {
            method: PASSWORD_METHOD,
            identifier,
            password,
        }
    }
}

/// Data submitted to a registration flow.
#[derive(Debug, Serialize)]
pub struct RegistrationSubmission<'a> {
    method: &'static str,
    password: &'a str,
    traits: RegistrationTraits<'a>,
}

#[derive(Debug, Serialize)]
struct RegistrationTraits<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<RegistrationName<'a>>,
}

#[derive(Debug, Serialize)]
struct RegistrationName<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<&'a str>,
}

impl<'a> RegistrationSubmission<'a> {
    /// Builds the payload. Empty name parts are left out, and the `name`
    /// object is left out entirely when neither part is given.
    #[must_use]
    pub fn new(
        email: &'a str,
        password: &'a str,
        first_name: Option<&'a str>,
        last_name: Option<&'a str>,
    ) -> Self {
        let first = first_name.filter(|s| !s.is_empty());
        let last = last_name.filter(|s| !s.is_empty());
        let name = (first.is_some() || last.is_some()).then_some(RegistrationName { first, last });

        Self {
            method: PASSWORD_METHOD,
            password,
            traits: RegistrationTraits { email, name },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_payload_uses_password_method() {
        let value = serde_json::to_value(LoginSubmission::new("a@b.com", "pw")).expect("json");
        assert_eq!(
            value,
            json!({"method": "password", "identifier": "a@b.com", "password": "pw"})
        );
    }

    #[test]
    fn empty_names_omit_name_object() {
        let payload = RegistrationSubmission::new("a@b.com", "x", Some(""), Some(""));
        let value = serde_json::to_value(payload).expect("json");
        assert_eq!(
            value,
            json!({"method": "password", "password": "x", "traits": {"email": "a@b.com"}})
        );

        let payload = RegistrationSubmission::new("a@b.com", "x", None, None);
        let value = serde_json::to_value(payload).expect("json");
        assert!(value["traits"].get("name").is_none());
    }

    #[test]
    fn only_provided_name_parts_are_sent() {
        let payload = RegistrationSubmission::new("a@b.com", "x", Some("Ada"), Some(""));
        let value = serde_json::to_value(payload).expect("json");
        assert_eq!(value["traits"]["name"], json!({"first": "Ada"}));

        let payload = RegistrationSubmission::new("a@b.com", "x", None, Some("Lovelace"));
        let value = serde_json::to_value(payload).expect("json");
        assert_eq!(value["traits"]["name"], json!({"last": "Lovelace"}));
    }

    #[test]
    fn full_name_is_sent() {
        let payload = RegistrationSubmission::new("a@b.com", "x", Some("Ada"), Some("Lovelace"));
        let value = serde_json::to_value(payload).expect("json");
        assert_eq!(
            value["traits"],
            json!({"email": "a@b.com", "name": {"first": "Ada", "last": "Lovelace"}})
        );
    }
}

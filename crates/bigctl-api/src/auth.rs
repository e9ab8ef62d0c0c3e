use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Environment variable holding the management API username.
pub const USER_ENV: &str = "BIGIP_USER";

/// Environment variable holding the management API password.
pub const PASS_ENV: &str = "BIGIP_PASS";

/// Basic-auth credentials for the BigIP management API.
///
/// Read once at startup and attached to every request. The password never
/// leaves the [`SecretString`] except when the `Authorization` header is built.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Load credentials from `BIGIP_USER` / `BIGIP_PASS`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// Both variables are required; the error names every one that is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let username = lookup(USER_ENV).filter(|v| !v.is_empty());
        let password = lookup(PASS_ENV).filter(|v| !v.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self::new(username, password.into())),
            (username, password) => {
                let missing: Vec<&str> = [
                    username.is_none().then_some(USER_ENV),
                    password.is_none().then_some(PASS_ENV),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(Error::MissingCredentials {
                    missing: missing.join(" and "),
                })
            }
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Attach the `Authorization: Basic ...` header to a request.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.username, Some(self.password.expose_secret()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn both_variables_present() {
        let creds =
            Credentials::from_lookup(lookup_from(&[(USER_ENV, "admin"), (PASS_ENV, "s3cret")]))
                .expect("credentials should resolve");
        assert_eq!(creds.username(), "admin");
        assert_eq!(creds.password.expose_secret(), "s3cret");
    }

    #[test]
    fn missing_password_is_reported() {
        let err = Credentials::from_lookup(lookup_from(&[(USER_ENV, "admin")])).unwrap_err();
        match err {
            Error::MissingCredentials { missing } => assert_eq!(missing, PASS_ENV),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_both_names_both() {
        let err = Credentials::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "BigIP credentials not configured: set BIGIP_USER and BIGIP_PASS"
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = Credentials::from_lookup(lookup_from(&[(USER_ENV, ""), (PASS_ENV, "x")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials { missing } if missing == USER_ENV));
    }
}

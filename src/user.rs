//! The configured git user.

use std::fmt;

use crate::ports::Environment;

/// The git user: a name and e-mail address.
///
/// The configured values are captured once. When the user is bound to an
/// environment, each accessor first consults the same variables git itself
/// honours, on every call.
#[derive(Clone, Copy)]
pub struct User<'a> {
    name: &'a str,
    email: &'a str,
    env: Option<&'a dyn Environment>,
}

impl<'a> User<'a> {
    /// A user with fixed name and e-mail, ignoring the environment.
    #[must_use]
    pub fn frozen(name: &'a str, email: &'a str) -> Self {
        Self { name, email, env: None }
    }

    /// A user whose configured values may be overridden by `env`.
    #[must_use]
    pub fn with_env(name: &'a str, email: &'a str, env: &'a dyn Environment) -> Self {
        Self { name, email, env: Some(env) }
    }

    /// Returns the user name, or the empty string if none is configured.
    ///
    /// Precedence: `GIT_AUTHOR_NAME`, `GIT_COMMITTER_NAME`, then `user.name`.
    #[must_use]
    pub fn name(&self) -> String {
        self.env
            .and_then(|env| env.first_of(&["GIT_AUTHOR_NAME", "GIT_COMMITTER_NAME"]))
            .unwrap_or_else(|| self.name.to_string())
    }

    /// Returns the user e-mail address, or the empty string if none is configured.
    ///
    /// Precedence: `GIT_AUTHOR_EMAIL`, `GIT_COMMITTER_EMAIL`, `user.email`,
    /// then `EMAIL`.
    #[must_use]
    pub fn email(&self) -> String {
        let Some(env) = self.env else {
            return self.email.to_string();
        };
        env.first_of(&["GIT_AUTHOR_EMAIL", "GIT_COMMITTER_EMAIL"])
            .or_else(|| (!self.email.is_empty()).then(|| self.email.to_string()))
            .or_else(|| env.var("EMAIL"))
            .unwrap_or_default()
    }
}

impl fmt::Display for User<'_> {
    /// `name <email>`, or whichever of the two is set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, email) = (self.name(), self.email());
        match (name.is_empty(), email.is_empty()) {
            (true, _) => f.write_str(&email),
            (false, true) => f.write_str(&name),
            (false, false) => write!(f, "{name} <{email}>"),
        }
    }
}

impl fmt::Debug for User<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User").field("name", &self.name()).field("email", &self.email()).finish()
    }
}

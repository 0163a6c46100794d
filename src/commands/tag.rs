//! Version tag for `gitinfo` itself.

use crate::info::GitInfo;

/// Name of the command.
pub const PROGRAM: &str = env!("CARGO_PKG_NAME");

/// Version of the command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of the commit prefix shown in the long tag.
pub const BUILD_PREFIX: isize = 10;

/// Returns `gitinfo v<version>`, extended with the state of the given
/// working copy when one is supplied.
///
/// The long form appends the branch and commit prefix (with a trailing `+`
/// on a modified checkout) and the git version: for example
/// `gitinfo v0.1.0 main 1a2b3c4d5e+ git v2.43.0`.
#[must_use]
pub fn tag(info: Option<&dyn GitInfo>) -> String {
    let mut parts = vec![format!("{PROGRAM} v{VERSION}")];
    let Some(info) = info else {
        return parts.join(" ");
    };

    let branch = info.branch().unwrap_or_default();
    if !branch.is_empty() {
        parts.push(branch);
    }
    if let Ok(Some(commit)) = info.commit() {
        if !commit.as_str().is_empty() {
            parts.push(commit.prefix(BUILD_PREFIX).to_string());
        }
    }
    if parts.len() > 1 && info.modified().unwrap_or(false) {
        if let Some(last) = parts.last_mut() {
            last.push('+');
        }
    }

    let version = info.version().unwrap_or_default();
    if !version.is_empty() {
        parts.push("git".to_string());
        parts.push(format!("v{version}"));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    #[test]
    fn short_tag_is_name_and_version() {
        assert_eq!(tag(None), format!("gitinfo v{VERSION}"));
    }

    #[test]
    fn long_tag_includes_branch_and_commit_prefix() {
        let info = Snapshot::build([
            ("branch", "main"),
            ("commit", "abc123def4567890"),
            ("modified", "false"),
            ("version", "2.43.0"),
        ]);
        assert_eq!(tag(Some(&info)), format!("gitinfo v{VERSION} main abc123def4 git v2.43.0"));
    }

    #[test]
    fn modified_checkout_gets_a_plus() {
        let info =
            Snapshot::build([("branch", "main"), ("commit", "abc123def"), ("modified", "true")]);
        assert_eq!(tag(Some(&info)), format!("gitinfo v{VERSION} main abc123def+"));
    }

    #[test]
    fn plus_lands_on_branch_without_commit() {
        let info = Snapshot::build([("branch", "main"), ("modified", "true")]);
        assert_eq!(tag(Some(&info)), format!("gitinfo v{VERSION} main+"));
    }

    #[test]
    fn no_working_copy_never_gets_a_plus() {
        let info = Snapshot::build([("modified", "true"), ("version", "2.43.0")]);
        assert_eq!(tag(Some(&info)), format!("gitinfo v{VERSION} git v2.43.0"));
    }
}

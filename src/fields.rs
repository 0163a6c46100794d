//! Field names of the flat information map, and field selection.
//!
//! Selection is a pure transformation over map keys: a selector is either a
//! concrete field name or a `prefix.*` wildcard matching every field that
//! starts with `prefix.`.

use std::collections::BTreeMap;

use thiserror::Error;

/// Current branch name.
pub const BRANCH: &str = "branch";
/// Full HEAD commit hash.
pub const COMMIT: &str = "commit";
/// Resolved editor command.
pub const EDITOR: &str = "editor";
/// `"true"` when the working copy has changes.
pub const MODIFIED: &str = "modified";
/// The inspected path.
pub const PATH: &str = "path";
/// Working copy root.
pub const ROOT: &str = "root";
/// Configured user e-mail.
pub const USER_EMAIL: &str = "user.email";
/// Configured user name.
pub const USER_NAME: &str = "user.name";
/// Version of the git executable.
pub const VERSION: &str = "version";

/// Every field of the flat map, sorted.
pub const ALL: [&str; 9] =
    [BRANCH, COMMIT, EDITOR, MODIFIED, PATH, ROOT, USER_EMAIL, USER_NAME, VERSION];

/// Fields describing the environment rather than the source tree.
pub const ENV_FIELDS: [&str; 6] = [EDITOR, PATH, ROOT, USER_EMAIL, USER_NAME, VERSION];

/// Fields describing the state of the source tree.
pub const SRC_FIELDS: [&str; 3] = [BRANCH, COMMIT, MODIFIED];

const WILDCARD: &str = ".*";

/// Errors from field selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A concrete field name that is not in the map.
    #[error("unknown field {0:?}")]
    UnknownField(String),

    /// A wildcard pattern that matched nothing.
    #[error("no match for pattern {0:?}")]
    NoMatch(String),
}

/// Returns the fields of `map` matched by a single selector, sorted.
///
/// # Errors
///
/// Returns an error if a concrete field is unknown or a wildcard matches nothing.
pub fn expand(map: &BTreeMap<String, String>, selector: &str) -> Result<Vec<String>, FieldError> {
    if map.contains_key(selector) {
        return Ok(vec![selector.to_string()]);
    }
    let Some(stem) = selector.strip_suffix(WILDCARD) else {
        return Err(FieldError::UnknownField(selector.to_string()));
    };
    let prefix = format!("{stem}.");
    let matched: Vec<String> = map.keys().filter(|k| k.starts_with(&prefix)).cloned().collect();
    if matched.is_empty() {
        return Err(FieldError::NoMatch(selector.to_string()));
    }
    Ok(matched)
}

/// Narrows `map` to the fields named by `selectors`.
///
/// With no selectors, the whole map is returned.
///
/// # Errors
///
/// Returns the first selector that fails to [`expand`].
pub fn select(
    map: BTreeMap<String, String>,
    selectors: Option<&[String]>,
) -> Result<BTreeMap<String, String>, FieldError> {
    let Some(selectors) = selectors else {
        return Ok(map);
    };
    let mut selected = BTreeMap::new();
    for selector in selectors {
        for field in expand(&map, selector)? {
            let value = map[&field].clone();
            selected.insert(field, value);
        }
    }
    Ok(selected)
}

/// Orders the fields of `map` for output.
///
/// With selectors, their order is kept and each wildcard is replaced in
/// place by its sorted matches; otherwise keys are sorted. Selectors that
/// match nothing contribute nothing.
#[must_use]
pub fn ordered(map: &BTreeMap<String, String>, selectors: Option<&[String]>) -> Vec<String> {
    match selectors {
        None => map.keys().cloned().collect(),
        Some(selectors) => selectors
            .iter()
            .flat_map(|selector| expand(map, selector).unwrap_or_default())
            .collect(),
    }
}

/// Every selectable field plus a `prefix.*` wildcard per dotted group, sorted.
#[must_use]
pub fn selectable() -> Vec<String> {
    let mut names: Vec<String> = ALL.iter().map(ToString::to_string).collect();
    for field in ALL {
        if let Some((group, _)) = field.split_once('.') {
            let wildcard = format!("{group}{WILDCARD}");
            if !names.contains(&wildcard) {
                names.push(wildcard);
            }
        }
    }
    names.sort();
    names
}

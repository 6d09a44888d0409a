//! Semantic version range matching.
//!
//! Ranges are evaluated by the `semver` crate. npm spells a few things
//! differently from Cargo (space separated comparators, `||` alternatives,
//! hyphen ranges and bare versions meaning an exact match), so range strings
//! are rewritten into `VersionReq` syntax before parsing.

use semver::{Version, VersionReq};

use crate::error::RangeError;

// Longest first, so `~>` and `>=` are not read as `~` and `>`
const OPERATORS: [&str; 8] = ["~>", ">=", "<=", ">", "<", "=", "~", "^"];

/// A parsed range: a version satisfies it if any alternative matches.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRange {
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    pub fn parse(range: &str) -> Result<Self, RangeError> {
        let range = range.trim();
        if range.is_empty() {
            return Err(RangeError::new(range, "empty range"));
        }

        let alternatives = range
            .split("||")
            .map(|set| {
                let translated = translate_set(set).map_err(|reason| RangeError::new(range, reason))?;
                VersionReq::parse(&translated).map_err(|e| RangeError::new(range, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { alternatives })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// Match a raw version string. Strings that are not valid semver always
    /// match so that malformed registry entries stay visible.
    pub fn matches_str(&self, version: &str) -> bool {
        match parse_version(version) {
            Some(version) => self.matches(&version),
            None => true,
        }
    }
}

/// Parse a registry version string, tolerating a leading `v` or `=`.
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version
        .strip_prefix('=')
        .unwrap_or(version)
        .trim_start_matches(['v', 'V']);
    Version::parse(version).ok()
}

/// Whether `version` satisfies `range`.
///
/// An empty range matches everything, and so does anything that fails to
/// parse on either side.
pub fn satisfies(version: &str, range: &str) -> bool {
    let range = range.trim();
    if range.is_empty() {
        return true;
    }

    match VersionRange::parse(range) {
        Ok(parsed) => parsed.matches_str(version),
        Err(e) => {
            tracing::debug!("{}, matching {} anyway", e, version);
            true
        }
    }
}

/// Rewrite one `||` alternative into comma separated `VersionReq` syntax.
fn translate_set(set: &str) -> Result<String, String> {
    let tokens = join_operators(set.split_whitespace().collect());

    if tokens.is_empty() {
        return Ok("*".to_string());
    }

    // "1.2.3 - 2.3.4" is inclusive on both ends
    if tokens.len() == 3 && tokens[1] == "-" {
        return Ok(format!(
            ">={}, <={}",
            strip_v(&tokens[0]),
            strip_v(&tokens[2])
        ));
    }
    if tokens.iter().any(|t| t == "-") {
        return Err("malformed hyphen range".to_string());
    }

    let comparators: Vec<String> = tokens.iter().map(|t| translate_comparator(t)).collect();
    Ok(comparators.join(", "))
}

/// Attach operators written with a trailing space (`>= 1.2.3`) to their version.
fn join_operators(tokens: Vec<&str>) -> Vec<String> {
    let mut joined = Vec::with_capacity(tokens.len());
    let mut pending: Option<&str> = None;

    for token in tokens {
        match pending.take() {
            Some(op) => joined.push(format!("{}{}", op, token)),
            None if OPERATORS.contains(&token) => pending = Some(token),
            None => joined.push(token.to_string()),
        }
    }
    if let Some(op) = pending {
        joined.push(op.to_string());
    }

    joined
}

fn translate_comparator(token: &str) -> String {
    if let Some(op) = OPERATORS.iter().find(|op| token.starts_with(*op)) {
        // `~>` is npm's alias for `~`
        let cargo_op = if *op == "~>" { "~" } else { *op };
        return format!("{}{}", cargo_op, strip_v(&token[op.len()..]));
    }

    let bare = strip_v(token);
    if is_wildcard(bare) {
        bare.to_string()
    } else {
        // npm reads a bare version as an exact match, Cargo as a caret
        format!("={}", bare)
    }
}

fn strip_v(version: &str) -> &str {
    version.trim_start_matches(['v', 'V'])
}

fn is_wildcard(version: &str) -> bool {
    let core = version.split(['-', '+']).next().unwrap_or(version);
    core.split('.').any(|part| matches!(part, "x" | "X" | "*"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range_matches_everything() {
        assert!(satisfies("1.0.0", ""));
        assert!(satisfies("not-a-version", ""));
        assert!(satisfies("", "   "));
    }

    #[test]
    fn test_unparseable_inputs_fail_open() {
        assert!(satisfies("not-a-version", "^1.0.0"));
        assert!(satisfies("1.0", "^2.0.0"));
        assert!(satisfies("1.0.0", "this is not a range"));
        assert!(satisfies("1.0.0", ">=>=1"));
    }

    #[test]
    fn test_caret_and_tilde() {
        assert!(satisfies("2.0.0", "^2.0.0"));
        assert!(satisfies("2.9.1", "^2.0.0"));
        assert!(!satisfies("3.0.0", "^2.0.0"));
        assert!(!satisfies("1.9.9", "^2.0.0"));

        assert!(satisfies("2.1.5", "~2.1"));
        assert!(!satisfies("2.2.0", "~2.1"));
    }

    #[test]
    fn test_bare_version_is_exact() {
        assert!(satisfies("1.2.3", "1.2.3"));
        assert!(!satisfies("1.2.4", "1.2.3"));
        assert!(satisfies("1.2.9", "1.2"));
        assert!(!satisfies("1.3.0", "1.2"));
    }

    #[test]
    fn test_wildcards() {
        assert!(satisfies("1.4.0", "1.x"));
        assert!(!satisfies("2.0.0", "1.x"));
        assert!(satisfies("7.7.7", "*"));
    }

    #[test]
    fn test_space_separated_comparators() {
        assert!(satisfies("1.5.0", ">=1.2.0 <2.0.0"));
        assert!(!satisfies("2.0.0", ">=1.2.0 <2.0.0"));
        assert!(satisfies("1.5.0", ">= 1.2.0 < 2.0.0"));
    }

    #[test]
    fn test_tilde_arrow_alias() {
        assert!(VersionRange::parse("~>1.2").is_ok());
        assert!(VersionRange::parse("~> 1.2").is_ok());
        assert!(satisfies("1.2.5", "~>1.2"));
        assert!(!satisfies("1.3.0", "~>1.2"));
        assert!(!satisfies("1.3.0", "~> 1.2.0"));
    }

    #[test]
    fn test_alternatives() {
        assert!(satisfies("1.0.0", "^1.0.0 || ^3.0.0"));
        assert!(satisfies("3.1.0", "^1.0.0 || ^3.0.0"));
        assert!(!satisfies("2.0.0", "^1.0.0 || ^3.0.0"));
    }

    #[test]
    fn test_hyphen_range() {
        assert!(satisfies("1.2.3", "1.2.3 - 2.3.4"));
        assert!(satisfies("2.3.4", "1.2.3 - 2.3.4"));
        assert!(!satisfies("2.3.5", "1.2.3 - 2.3.4"));
        assert!(VersionRange::parse("1.0.0 - ").is_err());
    }

    #[test]
    fn test_leading_v() {
        assert!(satisfies("v2.1.0", "^2.0.0"));
        assert!(satisfies("2.1.0", ">=v2.0.0"));
    }

    #[test]
    fn test_prereleases_need_matching_comparator() {
        assert!(!satisfies("2.1.0-beta.1", "^2.0.0"));
        assert!(satisfies("2.1.0-beta.2", ">=2.1.0-beta.1"));
    }

    #[test]
    fn test_parse_reports_range() {
        let err = VersionRange::parse("^^1").unwrap_err();
        assert_eq!(err.range, "^^1");
    }
}

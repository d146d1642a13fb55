use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// What a normalized identifier denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierMatch {
    Username(String),
    ProjectId(String),
    NoMatch,
}

struct Rule {
    name: &'static str,
    pattern: Regex,
    extract: fn(&str) -> IdentifierMatch,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, extract: fn(&str) -> IdentifierMatch) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("identifier rule pattern must compile"),
            extract,
        }
    }
}

fn username(capture: &str) -> IdentifierMatch {
    IdentifierMatch::Username(capture.to_string())
}

fn project_id(capture: &str) -> IdentifierMatch {
    IdentifierMatch::ProjectId(capture.to_string())
}

/// A bare token that is all digits is a project id, never a handle.
/// `turbowarp_project` already claims bare digits, so only handles reach
/// this rule in practice.
fn bare_segment(capture: &str) -> IdentifierMatch {
    if capture.bytes().all(|b| b.is_ascii_digit()) {
        project_id(capture)
    } else {
        username(capture)
    }
}

// Evaluated top to bottom, first match wins. Reordering changes which
// account an input resolves to. Only the host and keyword literals are
// case-insensitive, and only over ASCII, so captures stay within
// `[A-Za-z0-9_-]`.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            "scratch_user",
            r"^(?:(?i-u:scratch\.mit\.edu)/)?(?i-u:users)/([A-Za-z0-9_-]+)(?:[/?#].*)?$",
            username,
        ),
        Rule::new(
            "scratch_api_user",
            r"^(?:(?i-u:api\.scratch\.mit\.edu)/)?(?i-u:users)/([A-Za-z0-9_-]+)(?:[/?#].*)?$",
            username,
        ),
        Rule::new(
            "scratch_project",
            r"^(?:(?i-u:scratch\.mit\.edu)/)?(?i-u:projects)/([0-9]+)(?:[/?#].*)?$",
            project_id,
        ),
        Rule::new(
            "turbowarp_project",
            r"^(?:(?i-u:turbowarp\.org)/)?([0-9]+)(?:[/?#].*)?$",
            project_id,
        ),
        Rule::new(
            "single_segment",
            r"^([A-Za-z0-9_-]{3,20})(?:[/?#].*)?$",
            bare_segment,
        ),
    ]
});

static SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i-u:https?://)").expect("scheme pattern must compile"));

/// Strip scheme, `www.` and leading slashes so only host/path remains.
pub fn normalize_identifier(input: &str) -> String {
    let rest = match SCHEME.find(input) {
        Some(m) => &input[m.end()..],
        None => input,
    };
    let rest = match rest.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &rest[4..],
        _ => rest,
    };
    rest.trim_start_matches('/').to_string()
}

/// Run the rule cascade over an already normalized identifier.
pub fn classify_identifier(normalized: &str) -> IdentifierMatch {
    RULES
        .iter()
        .find_map(|rule| {
            let captures = rule.pattern.captures(normalized)?;
            let value = captures.get(1)?.as_str();
            trace!(rule = rule.name, value, "Identifier rule matched");
            Some((rule.extract)(value))
        })
        .unwrap_or(IdentifierMatch::NoMatch)
}

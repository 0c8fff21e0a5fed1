use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_PROMPT: &str = "INPUT:";
pub const DEFAULT_VARIABLE: &str = "x";

static INPUT_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:input|read)\s*\(\s*(?:"([^"]*)"|'([^']*)'|([^"',()]*?))\s*(,\s*["']?([A-Za-z_][A-Za-z0-9_]*)?["']?\s*)?\)$"#,
    )
    .expect("input directive pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// A request for external input found in an InputOutput body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDirective {
    pub prompt: String,
    pub variable: String,
}

impl InputDirective {
    /// Recognises `input(prompt, name)` / `read(prompt, name)`.
    ///
    /// Quotes around either argument are optional and both arguments may be
    /// left out. A lone unquoted name is the variable, so `input(n)` reads
    /// into `n`; any other lone argument is the prompt. An empty or missing
    /// prompt becomes `INPUT:` and a missing variable becomes `x`.
    pub fn parse(body: &str) -> Option<Self> {
        let captures = INPUT_DIRECTIVE.captures(body.trim())?;
        let quoted = captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str());
        let bare = captures.get(3).map(|m| m.as_str());
        let has_variable_slot = captures.get(4).is_some();
        let variable = captures.get(5).map(|m| m.as_str());

        let (prompt, variable) = match (quoted, bare) {
            (None, Some(name)) if !has_variable_slot && IDENTIFIER.is_match(name) => {
                (None, Some(name))
            }
            (Some(prompt), _) | (None, Some(prompt)) => (Some(prompt), variable),
            (None, None) => (None, variable),
        };

        Some(Self {
            prompt: prompt
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PROMPT)
                .to_string(),
            variable: variable.unwrap_or(DEFAULT_VARIABLE).to_string(),
        })
    }
}

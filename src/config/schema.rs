use serde::Deserialize;
use std::fmt;

/// Tab width assumed when none is configured.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Settings for path-query generation.
///
/// ```toml
/// tab_width = 4
/// text_kinds = ["identifier", "type_identifier"]
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Columns between tab stops when expanding tabs in target columns.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Kinds whose nodes carry a text attribute; the host's own set when absent.
    #[serde(default)]
    pub text_kinds: Option<Vec<String>>,
}

fn default_tab_width() -> usize {
    DEFAULT_TAB_WIDTH
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            text_kinds: None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.tab_width == 0 {
            issues.push(ValidationIssue::ZeroTabWidth);
        }

        if let Some(kinds) = &self.text_kinds {
            for (index, kind) in kinds.iter().enumerate() {
                if kind.trim().is_empty() {
                    issues.push(ValidationIssue::EmptyKind { index });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    ZeroTabWidth,
    EmptyKind { index: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::ZeroTabWidth => write!(f, "tab_width must be at least 1"),
            ValidationIssue::EmptyKind { index } => {
                write!(f, "text_kinds[{index}] must not be empty")
            }
        }
    }
}

//! Pattern-based action filtering for dispatch logs
//!
//! Patterns are matched against [`Action::name`](crate::Action::name):
//! - `*` matches any sequence of characters
//! - `?` matches any single character
//! - Literal text matches exactly
//!
//! # Example
//!
//! ```
//! use flux_dispatch_core::ActionFilter;
//!
//! let filter = ActionFilter::new(Some("*todo*"), Some("Clear*"));
//! assert!(filter.should_log("remove todo from server"));
//! assert!(!filter.should_log("Clear error from state"));
//! assert!(!filter.should_log("Something else"));
//! ```

/// Include/exclude glob patterns over action names.
///
/// An empty include list accepts every action. Excludes are applied after
/// includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    /// If non-empty, only log actions matching these patterns
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl ActionFilter {
    /// Create a filter from comma-separated pattern strings
    ///
    /// `None` or blank entries are ignored.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: split_patterns(include),
            exclude_patterns: split_patterns(exclude),
        }
    }

    /// Check if an action name should be logged
    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(patterns: Option<&str>) -> Vec<String> {
    patterns
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Simple glob pattern matching supporting `*` and `?`.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    let mut star_pi = None;
    let mut star_ti = 0;

    while ti < text.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == text[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            star_pi = Some(pi);
            star_ti = ti;
            pi += 1;
        } else if let Some(spi) = star_pi {
            // Backtrack: let the last star swallow one more character
            pi = spi + 1;
            star_ti += 1;
            ti = star_ti;
        } else {
            return false;
        }
    }

    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }

    pi == pattern.len()
}

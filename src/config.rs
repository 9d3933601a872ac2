//! Comparison configuration.

/// Options for value normalization and matching.
///
/// The defaults give the standard behavior: colors compare by channel values
/// and keywords compare case-insensitively. Turning an option off only makes
/// comparisons stricter. Property names are always looked up
/// case-insensitively (custom properties excepted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Compare colors in color-bearing properties by their RGBA channels.
    pub normalize_colors: bool,
    /// ASCII-lowercase keywords and function names before comparing.
    pub fold_keyword_case: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            normalize_colors: true,
            fold_keyword_case: true,
        }
    }
}

impl MatchConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable color normalization (builder).
    pub fn with_color_normalization(mut self, enabled: bool) -> Self {
        self.normalize_colors = enabled;
        self
    }

    /// Enable or disable keyword case folding (builder).
    pub fn with_keyword_case_folding(mut self, enabled: bool) -> Self {
        self.fold_keyword_case = enabled;
        self
    }
}

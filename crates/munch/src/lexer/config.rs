/// Configuration for building and running a lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    /// Minimize every pattern's DFA before registering it
    pub minimize: bool,

    /// Skip the offending character after a scan error and keep tokenizing
    pub error_recovery: bool,

    /// Maximum number of errors before giving up
    pub max_errors: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            minimize: true,
            error_recovery: true,
            max_errors: 100,
        }
    }
}

impl LexerConfig {
    /// Stop at the first scan error
    #[must_use]
    pub fn strict() -> Self {
        Self {
            error_recovery: false,
            max_errors: 1,
            ..Self::default()
        }
    }
}

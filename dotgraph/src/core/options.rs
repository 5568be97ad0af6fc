//! Options that control the parser.

/// The default number of recovered errors before the parser gives up.
pub const DEFAULT_MAX_ERRORS: usize = 32;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Trace every graph, node and edge as it is created.
    pub debug: bool,
    /// Abort the parse after recovering from this many errors.
    pub max_errors: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self {
            debug: false,
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

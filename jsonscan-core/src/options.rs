use serde::Deserialize;

/// What the parser accepts at the document root, and whether unquoted object keys are allowed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// The root must be an array or an object.
    Strict,
    /// A non-container root is read as a bare literal, and object keys may be unquoted.
    #[default]
    Lenient,
}

pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParseOptions {
    pub strictness: Strictness,
    /// Deepest container nesting accepted. `None` leaves recursion bounded only by the stack.
    pub max_depth: Option<usize>,
    /// Decode `\n`, `\"`, `\uXXXX` and friends in string literals. When off, string content is
    /// passed through verbatim and a backslash has no special meaning.
    pub decode_escapes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strictness: Strictness::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            decode_escapes: true,
        }
    }
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self::default().with_strictness(Strictness::Strict)
    }

    pub fn lenient() -> Self {
        Self::default().with_strictness(Strictness::Lenient)
    }

    #[must_use]
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_decode_escapes(mut self, decode_escapes: bool) -> Self {
        self.decode_escapes = decode_escapes;
        self
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }
}

use confique::Config as DeriveConfig;
use jsonscan_core::{ParseOptions, Strictness};

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// Require the document root to be an array or an object. When disabled, a bare literal is
    /// accepted at the root and object keys may be left unquoted.
    #[config(env = "JSONSCAN_STRICT", default = false)]
    pub strict: bool,

    /// Deepest container nesting accepted before the parse is aborted. `0` removes the limit, in
    /// which case deeply nested input can exhaust the stack.
    #[config(env = "JSONSCAN_MAX_DEPTH", default = 128)]
    pub max_depth: usize,

    /// Decode escape sequences such as `\n` and `\u00e9` in string literals. When disabled,
    /// string content is kept exactly as written.
    #[config(env = "JSONSCAN_DECODE_ESCAPES", default = true)]
    pub decode_escapes: bool,
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        let strictness = if self.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        };
        ParseOptions::default()
            .with_strictness(strictness)
            .with_max_depth((self.max_depth != 0).then_some(self.max_depth))
            .with_decode_escapes(self.decode_escapes)
    }
}

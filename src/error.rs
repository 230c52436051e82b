use thiserror::Error;

/// Precondition violations, detected before any layer is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {w}x{h}")]
    EmptyGrid { w: usize, h: usize },

    #[error("plate block layout must have positive dimensions")]
    EmptyBlocks,

    #[error("plate count must be positive")]
    NoPlates,

    #[error("{plates} plates exceed the {cells} available grid cells")]
    TooManyPlates { plates: usize, cells: usize },
}

/// Tabular document failures. Deserialization is atomic: any of these
/// aborts the whole read and no partial terrain escapes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("malformed number {token:?} on line {line}")]
    Number { token: String, line: usize },

    #[error("{layer} layer is {got_w}x{got_h}, expected {want_w}x{want_h}")]
    Dimensions {
        layer: &'static str,
        got_w: usize,
        got_h: usize,
        want_w: usize,
        want_h: usize,
    },

    #[error("expected 3 layer sections, found {found}")]
    Sections { found: usize },
}

/// Which groups are written out, and how they are formatted.
///
/// The CLI exposes three mutually exclusive flags; internally a single
/// four-case variant means no exclusivity check is ever needed past the
/// argument parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// One line per group, unconditionally.
    #[default]
    Plain,
    /// One line per group, prefixed with the decimal group count.
    Counted,
    /// Only groups seen more than once.
    DuplicatesOnly,
    /// Only groups seen exactly once.
    UniquesOnly,
}

impl EmitMode {
    /// Emit decision for a closed group of `count` lines.
    pub fn should_emit(self, count: u64) -> bool {
        match self {
            EmitMode::DuplicatesOnly => count > 1,
            EmitMode::UniquesOnly => count == 1,
            EmitMode::Plain | EmitMode::Counted => true,
        }
    }
}

/// Per-run configuration for the grouping engine.
///
/// Input and output endpoints are not part of this struct; the engine
/// operates on whatever reader/writer the caller hands it.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub mode: EmitMode,
    /// Fold keys to lowercase before comparison.
    pub ignore_case: bool,
    /// Space-delimited fields to skip at the start of each line.
    pub skip_fields: usize,
    /// Characters to skip after field skipping.
    pub skip_chars: usize,
}

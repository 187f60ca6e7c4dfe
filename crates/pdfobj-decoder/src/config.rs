use crate::yield_policy::YieldPolicy;

/// Largest integer an IEEE-754 double represents exactly (2^53 − 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Tuning for the value parser.
///
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────┐
/// │ Field        │ Purpose                                            │
/// ├──────────────┼────────────────────────────────────────────────────┤
/// │ number_limit │ Magnitude above which a number is flagged          │
/// │ cap_numbers  │ Clamp flagged numbers to ±number_limit             │
/// │ max_depth    │ Deepest allowed array/dictionary nesting           │
/// └──────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParserConfig {
    /// Numbers whose absolute value exceeds this are reported through
    /// [`ObjectParser::number_too_large`](crate::ObjectParser::number_too_large).
    pub number_limit: f64,

    /// When set, flagged numbers are replaced by `±number_limit`
    /// instead of being kept as parsed.
    pub cap_numbers: bool,

    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            number_limit: MAX_SAFE_INTEGER,
            cap_numbers: false,
            max_depth: 512,
        }
    }
}

/// Everything an [`ObjectStreamParser`](crate::ObjectStreamParser) can be
/// tuned with.
#[derive(Debug, Default)]
pub struct DecoderConfig {
    pub parser: ParserConfig,

    /// When the async decoder hands control back to the scheduler.
    pub yield_policy: YieldPolicy,
}

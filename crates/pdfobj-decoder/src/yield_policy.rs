use std::fmt;
use std::num::NonZeroUsize;

/// When [`ObjectStreamParser::decode`](crate::ObjectStreamParser::decode)
/// yields to the async runtime between entries.
///
/// Yielding is a scheduling hint only: decoding resumes with identical
/// state. The decision is taken after each entry except the last, so a
/// stream of N entries yields at most N − 1 times.
///
/// Dropping the `decode` future while it is suspended cancels the
/// decode. Objects already assigned stay in the store.
#[derive(Default)]
pub enum YieldPolicy {
    /// Never yield.
    #[default]
    Never,

    /// Yield after every k-th decoded entry.
    Every(NonZeroUsize),

    /// Ask the predicate before each yield decision.
    ///
    /// The predicate runs once per gap between entries, so callers can
    /// throttle dynamically (memory pressure, elapsed time, ...).
    When(Box<dyn FnMut() -> bool + Send>),
}

impl YieldPolicy {
    /// Convenience for [`YieldPolicy::When`].
    pub fn when(predicate: impl FnMut() -> bool + Send + 'static) -> Self {
        Self::When(Box::new(predicate))
    }

    /// Decide whether to yield after the entry at `index` (0-based).
    pub(crate) fn should_yield(&mut self, index: usize) -> bool {
        match self {
            Self::Never => false,
            Self::Every(k) => (index + 1) % k.get() == 0,
            Self::When(predicate) => predicate(),
        }
    }
}

impl fmt::Debug for YieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("Never"),
            Self::Every(k) => f.debug_tuple("Every").field(k).finish(),
            Self::When(_) => f.write_str("When(..)"),
        }
    }
}

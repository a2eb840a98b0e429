use crate::error::{ChartError, ChartResult};

/// Number of leading rows dropped from an extracted series, used while an
/// indicator is still inside its warm-up window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Trim(usize);

impl Trim {
    pub const NONE: Self = Self(0);

    pub const fn new(rows: usize) -> Self {
        Self(rows)
    }

    #[inline]
    pub fn value(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for Trim {
    type Error = ChartError;

    fn try_from(trim: i64) -> ChartResult<Self> {
        usize::try_from(trim)
            .map(Self)
            .map_err(|_| ChartError::InvalidTrim { trim })
    }
}

impl std::fmt::Display for Trim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rows", self.0)
    }
}

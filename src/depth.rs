use crate::error::FsMapError;

/// Remaining number of directory levels the engine may descend into.
///
/// `Remaining(0)` still records the immediate children of the directory
/// being listed; it only stops the engine from listing any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    #[default]
    Unlimited,
    Remaining(usize),
}

impl Depth {
    /// Budget handed to the children of a directory, or `None` when the
    /// directory must not be listed.
    pub fn descend(self) -> Option<Depth> {
        match self {
            Depth::Unlimited => Some(Depth::Unlimited),
            Depth::Remaining(0) => None,
            Depth::Remaining(n) => Some(Depth::Remaining(n - 1)),
        }
    }
}

impl TryFrom<i64> for Depth {
    type Error = FsMapError;

    /// `-1` is unlimited, `n >= 0` is a finite budget.
    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            -1 => Ok(Depth::Unlimited),
            n if n >= 0 => usize::try_from(n)
                .map(Depth::Remaining)
                .map_err(|_| FsMapError::InvalidDepth(raw)),
            _ => Err(FsMapError::InvalidDepth(raw)),
        }
    }
}

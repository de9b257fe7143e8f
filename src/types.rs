/// How many log lines a job's buffer retains.
///
/// - `Unbounded` (default): every line is kept for the life of the job.
/// - `Capped`: only the most recent `n` lines are kept; older lines are
///   evicted from the front. Evictions are counted, and an observer whose
///   cursor falls behind is told how many lines it missed before it sees
///   any content; truncation is never silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogRetention {
    #[default]
    Unbounded,
    Capped(usize),
}

impl LogRetention {
    /// Build a retention policy from the `max_log_lines` config value.
    ///
    /// `None` means unbounded. A `Some(0)` is rejected during config
    /// validation before it can reach here.
    pub fn from_max_lines(max: Option<usize>) -> Self {
        match max {
            Some(n) => LogRetention::Capped(n),
            None => LogRetention::Unbounded,
        }
    }

    /// The cap in lines, if any.
    pub fn cap(self) -> Option<usize> {
        match self {
            LogRetention::Unbounded => None,
            LogRetention::Capped(n) => Some(n),
        }
    }
}

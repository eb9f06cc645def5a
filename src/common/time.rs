use crate::common::constants::WAIT_FOREVER;
use std::time::Duration;

/// How long a wait may block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    Forever,
    Immediate,
    After(Duration),
}

impl Timeout {
    /// Negative values block forever, zero polls, positive values are milliseconds.
    pub fn from_millis(ms: i64) -> Self {
        if ms < 0 {
            Timeout::Forever
        } else if ms == 0 {
            Timeout::Immediate
        } else {
            Timeout::After(Duration::from_millis(ms as u64))
        }
    }

    /// Millisecond value in the form `poll(2)` expects.
    ///
    /// Sub-millisecond remainders round up so a short positive timeout never
    /// degrades into a non-blocking poll. Overlong durations clamp to `c_int::MAX`.
    pub fn as_poll_millis(&self) -> libc::c_int {
        match self {
            Timeout::Forever => -1,
            Timeout::Immediate => 0,
            Timeout::After(d) => {
                let mut ms = d.as_millis();
                if d.subsec_nanos() % 1_000_000 != 0 {
                    ms += 1;
                }
                ms.min(libc::c_int::MAX as u128) as libc::c_int
            }
        }
    }

    pub fn is_forever(&self) -> bool {
        matches!(self, Timeout::Forever)
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::from_millis(WAIT_FOREVER)
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        if d.is_zero() {
            Timeout::Immediate
        } else {
            Timeout::After(d)
        }
    }
}

impl From<Option<Duration>> for Timeout {
    fn from(d: Option<Duration>) -> Self {
        match d {
            Some(d) => Timeout::from(d),
            None => Timeout::Forever,
        }
    }
}

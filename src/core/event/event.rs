use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Bitmask of readiness conditions.
///
/// The same type carries both what a caller asked to watch and what a wait
/// observed. `PRIORITY` only exists when the `priority` feature is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Events(u16);

impl Events {
    pub const NONE: Events = Events(0);
    pub const READABLE: Events = Events(1);
    pub const WRITABLE: Events = Events(2);
    pub const ERROR: Events = Events(4);
    #[cfg(feature = "priority")]
    pub const PRIORITY: Events = Events(8);

    #[cfg(feature = "priority")]
    const NAMED: &'static [(&'static str, Events)] = &[
        ("readable", Events::READABLE),
        ("writable", Events::WRITABLE),
        ("error", Events::ERROR),
        ("priority", Events::PRIORITY),
    ];

    #[cfg(not(feature = "priority"))]
    const NAMED: &'static [(&'static str, Events)] = &[
        ("readable", Events::READABLE),
        ("writable", Events::WRITABLE),
        ("error", Events::ERROR),
    ];

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn all() -> Self {
        Self::NAMED
            .iter()
            .fold(Events::NONE, |acc, (_, flag)| acc | *flag)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Events) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Events) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_readable(self) -> bool {
        self.intersects(Events::READABLE)
    }

    pub fn is_writable(self) -> bool {
        self.intersects(Events::WRITABLE)
    }

    pub fn is_error(self) -> bool {
        self.intersects(Events::ERROR)
    }

    #[cfg(feature = "priority")]
    pub fn is_priority(self) -> bool {
        self.intersects(Events::PRIORITY)
    }

    /// Looks up a single condition by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name == "none" {
            return Some(Events::NONE);
        }
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, flag)| *flag)
    }
}

impl BitOr for Events {
    type Output = Events;

    fn bitor(self, rhs: Events) -> Events {
        Events(self.0 | rhs.0)
    }
}

impl BitOrAssign for Events {
    fn bitor_assign(&mut self, rhs: Events) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Events {
    type Output = Events;

    fn bitand(self, rhs: Events) -> Events {
        Events(self.0 & rhs.0)
    }
}

impl BitAndAssign for Events {
    fn bitand_assign(&mut self, rhs: Events) {
        self.0 &= rhs.0;
    }
}

impl Not for Events {
    type Output = Events;

    fn not(self) -> Events {
        Events(!self.0 & Self::all().0)
    }
}

impl fmt::Display for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }

        let mut first = true;
        for (name, flag) in Self::NAMED {
            if self.contains(*flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name.to_ascii_uppercase())?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_and_query() {
        let rw = Events::READABLE | Events::WRITABLE;
        assert!(rw.contains(Events::READABLE));
        assert!(rw.contains(Events::WRITABLE));
        assert!(!rw.contains(Events::ERROR));
        assert!(rw.is_readable() && rw.is_writable());
        assert_eq!(rw & Events::WRITABLE, Events::WRITABLE);
        assert!((rw & Events::ERROR).is_empty());
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(Events::default(), Events::NONE);
        assert!(Events::NONE.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Events::NONE.to_string(), "NONE");
        assert_eq!(
            (Events::READABLE | Events::ERROR).to_string(),
            "READABLE|ERROR"
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Events::from_name("readable"), Some(Events::READABLE));
        assert_eq!(Events::from_name(" Writable "), Some(Events::WRITABLE));
        assert_eq!(Events::from_name("none"), Some(Events::NONE));
        assert_eq!(Events::from_name("urgent"), None);
    }

    #[test]
    fn test_complement_of_all_is_empty() {
        assert!((!Events::all()).is_empty());
    }

    #[cfg(feature = "priority")]
    #[test]
    fn test_priority_flag() {
        assert!(Events::all().contains(Events::PRIORITY));
        assert_eq!(Events::from_name("priority"), Some(Events::PRIORITY));
        assert!(Events::PRIORITY.is_priority());
    }

    #[cfg(not(feature = "priority"))]
    #[test]
    fn test_priority_flag_absent() {
        assert_eq!(Events::from_name("priority"), None);
        assert_eq!(Events::all().bits(), 7);
    }
}

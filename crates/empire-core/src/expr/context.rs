use std::ops;

/// Selects which parts of an expression are rendered.
///
/// A column rendered with `NAME` emits its name, with `FULLNAME` it is
/// qualified by its rowset alias. `VALUE` emits the right side of
/// comparisons and assignments, `ALIAS` the `AS` names of the select list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context(u8);

impl Context {
    pub const NONE: Context = Context(0);
    pub const NAME: Context = Context(1);
    pub const FULLNAME: Context = Context(2);
    pub const VALUE: Context = Context(4);
    pub const ALIAS: Context = Context(8);
    pub const NOPARENTHESES: Context = Context(16);

    pub const DEFAULT: Context = Context(1 | 2 | 4);
    pub const ALL: Context = Context(1 | 2 | 4 | 8);

    pub const fn contains(self, other: Context) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn without(self, other: Context) -> Context {
        Context(self.0 & !other.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl ops::BitOr for Context {
    type Output = Context;

    fn bitor(self, rhs: Context) -> Context {
        Context(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Context {
    fn bitor_assign(&mut self, rhs: Context) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::Context;

    #[test]
    fn masks() {
        assert!(Context::ALL.contains(Context::DEFAULT));
        assert!(!Context::DEFAULT.contains(Context::ALIAS));
        assert_eq!(Context::ALL.without(Context::ALIAS), Context::DEFAULT);
        assert_eq!((Context::NAME | Context::VALUE).bits(), 5);
    }
}

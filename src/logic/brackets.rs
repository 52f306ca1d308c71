//! Ordered piecewise lookup tables.
//!
//! A table is a list of `(bound, factor)` pairs scanned top to bottom; the
//! first bound the value satisfies wins. Values that satisfy no bound (large
//! values and NaN) fall through to `otherwise`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// value < limit
    Below(f64),
    /// value <= limit
    AtMost(f64),
}

impl Bound {
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Bound::Below(limit) => value < limit,
            Bound::AtMost(limit) => value <= limit,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BracketTable {
    pub brackets: &'static [(Bound, f64)],
    pub otherwise: f64,
}

impl BracketTable {
    pub const fn new(brackets: &'static [(Bound, f64)], otherwise: f64) -> Self {
        Self {
            brackets,
            otherwise,
        }
    }

    pub fn lookup(&self, value: f64) -> f64 {
        self.brackets
            .iter()
            .find(|(bound, _)| bound.contains(value))
            .map(|(_, factor)| *factor)
            .unwrap_or(self.otherwise)
    }
}

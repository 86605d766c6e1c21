use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination field of a compute instruction: `d1 d2 d3` = A, D, M.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dest {
    pub a: bool,
    pub d: bool,
    pub m: bool,
}

impl Dest {
    pub const NONE: Dest = Dest::new(false, false, false);
    pub const A: Dest = Dest::new(true, false, false);
    pub const D: Dest = Dest::new(false, true, false);
    pub const M: Dest = Dest::new(false, false, true);
    pub const AM: Dest = Dest::new(true, false, true);
    pub const AD: Dest = Dest::new(true, true, false);
    pub const MD: Dest = Dest::new(false, true, true);
    pub const AMD: Dest = Dest::new(true, true, true);

    pub const fn new(a: bool, d: bool, m: bool) -> Self {
        Dest { a, d, m }
    }

    pub fn is_empty(&self) -> bool {
        !(self.a || self.d || self.m)
    }

    pub fn bits(&self) -> u8 {
        (self.a as u8) << 2 | (self.d as u8) << 1 | self.m as u8
    }

    pub fn from_bits(bits: u8) -> Self {
        Dest::new(bits & 0b100 != 0, bits & 0b010 != 0, bits & 0b001 != 0)
    }

    /// All eight destination sets, in bit order.
    pub fn all() -> impl Iterator<Item = Dest> {
        (0..8).map(Dest::from_bits)
    }

    /// Parse a destination such as `AM` or `MD`. Letters may come in any
    /// order but each at most once; the empty string is the empty set.
    pub fn parse(s: &str) -> Option<Self> {
        let mut dest = Dest::NONE;
        for c in s.trim().chars() {
            let slot = match c {
                'A' => &mut dest.a,
                'D' => &mut dest.d,
                'M' => &mut dest.m,
                _ => return None,
            };
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(dest)
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a {
            write!(f, "A")?;
        }
        if self.m {
            write!(f, "M")?;
        }
        if self.d {
            write!(f, "D")?;
        }
        Ok(())
    }
}

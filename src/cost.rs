use std::fmt;

use crate::error::{BCryptError, Result};

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;
pub const DEFAULT_COST: u32 = 10;

/// Base-2 logarithm of the number of expensive key schedule rounds.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CostFactor(u32);

impl CostFactor {
    pub const MIN: CostFactor = CostFactor(MIN_COST);
    pub const MAX: CostFactor = CostFactor(MAX_COST);
    pub const DEFAULT: CostFactor = CostFactor(DEFAULT_COST);

    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(BCryptError::InvalidCost(cost));
        }
        Ok(CostFactor(cost))
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Number of expensive key schedule rounds, `2^cost`.
    pub const fn rounds(self) -> u64 {
        1u64 << self.0
    }
}

impl Default for CostFactor {
    fn default() -> Self {
        CostFactor::DEFAULT
    }
}

impl TryFrom<u32> for CostFactor {
    type Error = BCryptError;

    fn try_from(cost: u32) -> Result<Self> {
        CostFactor::new(cost)
    }
}

impl fmt::Display for CostFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cost_factors() {
        // Cost factor too low
        assert_eq!(CostFactor::new(3), Err(BCryptError::InvalidCost(3)));

        // Cost factor too high
        assert_eq!(CostFactor::new(32), Err(BCryptError::InvalidCost(32)));

        // Valid cost factors
        assert!(CostFactor::new(4).is_ok());
        assert!(CostFactor::new(31).is_ok());
    }

    #[test]
    fn rounds_are_powers_of_two() -> Result<()> {
        assert_eq!(CostFactor::new(4)?.rounds(), 16);
        assert_eq!(CostFactor::default().rounds(), 1024);
        assert_eq!(CostFactor::MAX.rounds(), 2_147_483_648);
        Ok(())
    }

    #[test]
    fn displays_zero_padded() -> Result<()> {
        assert_eq!(CostFactor::new(4)?.to_string(), "04");
        assert_eq!(CostFactor::new(12)?.to_string(), "12");
        Ok(())
    }
}

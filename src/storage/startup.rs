use rand::{rngs::StdRng, SeedableRng};

/// How the cells of a freshly constructed storage unit are initialized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// Every cell starts at zero.
    #[default]
    Zero,
    /// Every cell starts with a masked pseudo-random value, emulating
    /// uninitialized hardware memory. A seed makes the contents reproducible.
    Unknown { seed: Option<u64> },
}

impl Startup {
    /// Generator used to fill a new unit, `None` when cells stay zeroed.
    pub(crate) fn rng(&self) -> Option<StdRng> {
        match self {
            Startup::Zero => None,
            Startup::Unknown { seed: Some(seed) } => Some(StdRng::seed_from_u64(*seed)),
            Startup::Unknown { seed: None } => Some(StdRng::from_entropy()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Startup::Unknown { .. })
    }
}

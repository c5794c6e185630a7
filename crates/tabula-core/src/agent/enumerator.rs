use crate::agent::{
    abstraction::AbstractState,
    config::{AbstractionConfig, ConfigError},
};

/// Enumerates the full abstract state space as a Cartesian product of the
/// configured ranges. Order is fixed: position, target bucket, threat bucket,
/// then `neutralized = true` before `false`.
#[derive(Debug, Clone)]
pub struct StateEnumerator {
    positions: Vec<u32>,
    distance_buckets: u32,
    len: usize,
}

impl StateEnumerator {
    /// Validate the ranges and fail if they would produce no states or more
    /// states than fit in a `usize`.
    pub fn new(config: &AbstractionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let positions = (config.position_start..config.position_end)
            .step_by(config.position_step as usize)
            .collect();
        let len = config.state_count()?;

        Ok(StateEnumerator {
            positions,
            distance_buckets: config.distance_buckets,
            len,
        })
    }

    /// Number of states `iter` yields.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> StateIter<'_> {
        StateIter {
            enumerator: self,
            cursor: 0,
        }
    }

    /// Collect every state in enumeration order.
    pub fn states(&self) -> Vec<AbstractState> {
        self.iter().collect()
    }
}

/// Iterator over the enumerated states; decodes a flat cursor into the four fields.
pub struct StateIter<'a> {
    enumerator: &'a StateEnumerator,
    cursor: usize,
}

impl Iterator for StateIter<'_> {
    type Item = AbstractState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.enumerator.len() {
            return None;
        }
        let buckets = self.enumerator.distance_buckets as usize;
        let mut rest = self.cursor;

        let neutralized = rest % 2 == 0;
        rest /= 2;
        let threat = rest % buckets;
        rest /= buckets;
        let target = rest % buckets;
        rest /= buckets;
        let position = self.enumerator.positions[rest];

        self.cursor += 1;
        Some(AbstractState::from_buckets(
            position,
            target as u32,
            threat as u32,
            neutralized,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.enumerator.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StateIter<'_> {}

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use factgen_core::{AttributePool, GeneratorConfig, Scalar};

use crate::model::{Fact, FactValue};

/// Draws facts from an attribute pool using a single ChaCha8 stream.
///
/// The stream is seeded once and never reseeded; draws per attribute are:
/// - cap 1: one `random_range(0..len)` index;
/// - cap > 1: one `random_range(1..=cap)` for `k`, clamped to the pool size,
///   then `k` partial Fisher-Yates steps `random_range(i..len)` over pool
///   indices.
///
/// Attributes are visited in discovery order, so a fixed seed, pool and
/// config always yield the same facts.
pub struct FactSampler<'a> {
    pool: &'a AttributePool,
    config: &'a GeneratorConfig,
    rng: ChaCha8Rng,
    indices: Vec<usize>,
}

impl<'a> FactSampler<'a> {
    pub fn new(pool: &'a AttributePool, config: &'a GeneratorConfig) -> Self {
        Self {
            pool,
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            indices: Vec::new(),
        }
    }

    /// Draw the next fact from the stream.
    pub fn sample(&mut self) -> Fact<'a> {
        let pool = self.pool;
        let mut fact = Fact::with_capacity(pool.len());
        for (attr, values) in pool.iter() {
            let cap = self.config.max_cardinality(attr);
            let value = if cap <= 1 {
                FactValue::Single(&values[self.rng.random_range(0..values.len())])
            } else {
                let k = self.rng.random_range(1..=cap) as usize;
                FactValue::Many(self.choose_distinct(values, k))
            };
            fact.push(attr, value);
        }
        fact
    }

    /// Pick `k` distinct positions of `values` without replacement, in drawn
    /// order. `k` is clamped to the number of values.
    fn choose_distinct(&mut self, values: &'a [Scalar], k: usize) -> Vec<&'a Scalar> {
        let len = values.len();
        let k = k.min(len);

        self.indices.clear();
        self.indices.extend(0..len);
        for i in 0..k {
            let j = self.rng.random_range(i..len);
            self.indices.swap(i, j);
        }

        self.indices[..k].iter().map(|&idx| &values[idx]).collect()
    }
}

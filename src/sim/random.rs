//! Randomness for the race
//!
//! The engine draws every random number through `RandomSource`, so the
//! generator can be swapped (seeded for tests/replays, scripted for unit
//! tests) without touching the simulation code.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

/// Default race RNG (PCG32)
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy, falling back to the clock when unavailable
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn next_unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }
}

/// Pick a seed from OS entropy. A race must never fail to start, so a
/// missing entropy source degrades to a clock-derived seed with a warning.
pub fn entropy_seed() -> u64 {
    match Pcg32::try_from_os_rng() {
        Ok(mut rng) => rng.random::<u64>(),
        Err(e) => {
            log::warn!("OS entropy unavailable ({}), seeding race RNG from clock", e);
            clock_seed()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

/// Uniform value in [min, max). Returns `min` for an empty or inverted range.
#[inline]
pub fn uniform<R: RandomSource + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + rng.next_unit() * (max - min)
}

/// `base` plus up to `range` of random slack
#[inline]
pub fn uniform_from_base<R: RandomSource + ?Sized>(rng: &mut R, base: f32, range: f32) -> f32 {
    uniform(rng, base, base + range)
}

/// True with probability `p`
#[inline]
pub fn chance<R: RandomSource + ?Sized>(rng: &mut R, p: f32) -> bool {
    if p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.next_unit() < p
    }
}

/// Plays back a fixed sequence of samples, cycling
#[cfg(test)]
pub(crate) struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(values: &[f32]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

//! Mulberry32 random number generator
//!
//! A 32-bit state generator: small, fast and fully reproducible for a given
//! seed. Every draw is counted so a stream position can be restored by
//! replaying, and draws can optionally be recorded for divergence debugging.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Increment added to the state on every draw
const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;

/// 2^32 as a float, used to map raw output into [0, 1)
const TWO_POW_32: f64 = 4_294_967_296.0;

/// An RNG call trace entry for debugging divergences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Function name (e.g. "next_f64", "next_u32")
    pub func: &'static str,
    /// Raw u32 produced by the generator
    pub raw: u32,
}

/// Mulberry32 generator context
#[derive(Clone, Serialize, Deserialize)]
pub struct Mulberry32 {
    /// Seed the stream was started from
    seed: u32,
    /// Running state
    state: u32,
    /// Total number of u32 values produced
    call_count: u64,
    /// If true, record all calls into trace log
    #[serde(skip)]
    tracing: bool,
    /// Trace log (only populated when tracing is true)
    #[serde(skip)]
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for Mulberry32 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mulberry32")
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("call_count", &self.call_count)
            .finish()
    }
}

impl Mulberry32 {
    /// Create a new generator seeded with a u32 value.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            state: seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Restart the stream from `seed`, discarding the current position.
    ///
    /// The trace log is cleared but tracing stays enabled if it was on.
    pub fn reseed(&mut self, seed: u32) {
        self.seed = seed;
        self.state = seed;
        self.call_count = 0;
        self.trace.clear();
    }

    /// Seed the stream was started from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the state and mix it into an output word
    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        self.call_count += 1;
        t ^ (t >> 14)
    }

    fn record(&mut self, func: &'static str, raw: u32) {
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count - 1,
                func,
                raw,
            });
        }
    }

    /// Next raw 32-bit output
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        let raw = self.step();
        self.record("next_u32", raw);
        raw
    }

    /// Next float in [0, 1)
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        let raw = self.step();
        self.record("next_f64", raw);
        raw as f64 / TWO_POW_32
    }

    /// Skip `n` draws without producing output (used to restore a position)
    pub fn advance(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Enable RNG tracing
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Disable RNG tracing
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Get current RNG trace
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    /// Total number of raw u32 values produced since the last seed
    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}

impl Default for Mulberry32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_raw() as u64;
        let lo = self.next_raw() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

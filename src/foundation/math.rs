use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x6b1d_f3a0_52c4_e97d;

/// Seeded xxh3 hasher with explicit, length-prefixed writes so that field boundaries are part
/// of the digest.
pub(crate) struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    pub(crate) fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    pub(crate) fn finish(&self) -> u64 {
        self.inner.digest()
    }
}

/// Hash a single string with the stable seed.
pub(crate) fn stable_hash_str(s: &str) -> u64 {
    let mut h = StableHasher::new();
    h.write_str(s);
    h.finish()
}

/// Format a percentage with at most two decimals and no trailing zeros (`38.2`, `100`, `0`).
pub(crate) fn fmt_percent(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    // Avoid "-0" after rounding tiny negatives.
    let r = if r == 0.0 { 0.0 } else { r };
    let s = format!("{r:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}%")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::env;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Arc, Mutex, OnceLock};

use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use zipf::ZipfDistribution;

/// A set of input patterns shared by the tests and benchmarks. Everything is
/// derived from one root seed, printed by the test suite and overridable via the
/// `OVERRIDE_SEED` env var, so failing runs can be replayed.
///
/// Currently limited to i32 values.

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    random_vec(len)
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>> + Hash,
{
    // :.:.:.::

    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, range, |len, seed, range| {
        let mut rng: XorShiftRng = rand::SeedableRng::seed_from_u64(seed);

        let dist: rand::distributions::Uniform<i32> = range.into();
        (0..len).map(|_| dist.sample(&mut rng)).collect()
    })
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law

    if len == 0 {
        return Vec::new();
    }

    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, exponent.to_bits(), |len, seed, exponent_bits| {
        let mut rng: XorShiftRng = rand::SeedableRng::seed_from_u64(seed);

        let dist = ZipfDistribution::new(len, f64::from_bits(exponent_bits)).unwrap();
        (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
    })
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    //  ^      ^
    //  |      |
    // sorted  |
    //     unsorted

    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, sorted_percent.to_bits(), |len, _seed, spb| {
        let sorted_percent = f64::from_bits(spb);
        let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;

        let mut v = random_vec(len);
        v[0..sorted_len].sort_unstable();

        v
    })
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    if len == 0 {
        return Vec::new();
    }

    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, saw_count, |len, _seed, saw_count| {
        let mut vals = random_vec(len);
        let chunk_size = len / saw_count.max(1);

        for chunk in vals.chunks_mut(chunk_size.max(1)) {
            chunk.sort_unstable();
        }

        vals
    })
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    if len == 0 {
        return Vec::new();
    }

    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, saw_count, |len, _seed, saw_count| {
        let mut vals = random_vec(len);
        let chunk_size = len / saw_count.max(1);

        for chunk in vals.chunks_mut(chunk_size.max(1)) {
            chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
        }

        vals
    })
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, saw_count, |len, _seed, saw_count| {
        let mut vals = random_vec(len);
        let chunk_size = (len / saw_count.max(1)).max(1);
        let directions = random_uniform(len / chunk_size + 1, 0..=1);

        for (i, chunk) in vals.chunks_mut(chunk_size).enumerate() {
            if directions[i] == 0 {
                chunk.sort_unstable();
            } else {
                chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
            }
        }

        vals
    })
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, (), |len, _seed, ()| {
        let mut vals = random_vec(len);

        let (front, back) = vals.split_at_mut(len / 2);
        front.sort_unstable();
        back.sort_unstable_by_key(|&e| std::cmp::Reverse(e));

        vals
    })
}

pub fn get_or_init_rand_seed() -> u64 {
    *SEED_VALUE.get_or_init(|| {
        env::var("OVERRIDE_SEED")
            .ok()
            .map(|seed| u64::from_str(&seed).unwrap())
            .unwrap_or_else(rand_root_seed)
    })
}

// --- Private ---

static SEED_VALUE: OnceLock<u64> = OnceLock::new();

#[cfg(not(miri))]
fn rand_root_seed() -> u64 {
    // Seconds since the UNIX epoch divided by ten: coarse enough to reconstruct
    // from a CI log timestamp, fresh enough to keep exploring the input space
    // across runs.
    use std::time::{SystemTime, UNIX_EPOCH};

    let epoch_seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    epoch_seconds / 10
}

#[cfg(miri)]
fn rand_root_seed() -> u64 {
    // Miri runs isolated, so take whatever its shimmed entropy provides.
    thread_rng().gen()
}

/// With a fixed seed every generator is deterministic, and a lock plus memcpy of
/// a cached prefix beats regenerating, especially in debug builds. Keyed entries
/// remember the longest vector requested so far; shorter requests are served as
/// prefixes of it.
struct PatternCache {
    entries: Mutex<Option<HashMap<u64, Arc<Vec<i32>>>>>,
}

impl PatternCache {
    const fn new() -> Self {
        Self {
            entries: Mutex::new(None),
        }
    }

    // Takes a fn pointer rather than a closure: captured state would not be part
    // of the cache key.
    fn copy_or_gen<K: Hash>(
        &self,
        len: usize,
        key: K,
        gen_fn: fn(usize, u64, K) -> Vec<i32>,
    ) -> Vec<i32> {
        let seed = get_or_init_rand_seed();

        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let key_hash = hasher.finish();

        {
            let mut guard = self.entries.lock().unwrap();
            if let Some(cached) = guard.get_or_insert_with(HashMap::new).get(&key_hash) {
                if cached.len() >= len {
                    let cached = Arc::clone(cached);
                    // Return control to other threads before the copy.
                    drop(guard);

                    return cached[..len].to_vec();
                }
            }

            // Drop the lock while generating; racing another thread here is fine,
            // the insert below keeps whichever result is larger.
        }

        let fresh = Arc::new(gen_fn(len, seed, key));
        let out = fresh[..].to_vec();

        let mut guard = self.entries.lock().unwrap();
        let slot = guard
            .get_or_insert_with(HashMap::new)
            .entry(key_hash)
            .or_default();
        if fresh.len() > slot.len() {
            *slot = fresh;
        }

        out
    }
}

fn random_vec(len: usize) -> Vec<i32> {
    static CACHE: PatternCache = PatternCache::new();

    CACHE.copy_or_gen(len, (), |len, seed, ()| {
        let mut rng: XorShiftRng = rand::SeedableRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen::<i32>()).collect()
    })
}

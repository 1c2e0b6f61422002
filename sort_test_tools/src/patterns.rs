use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use rand::prelude::*;

use rand_xorshift::XorShiftRng;

use zipf::ZipfDistribution;

/// Provides a set of patterns useful for testing sorting algorithms.
/// Currently limited to i32 values.
///
/// Every pattern is generated from the shared seed, see [`random_init_seed`],
/// so a failing run can be reproduced by exporting `OVERRIDE_SEED`.

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::

    let mut rng = new_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();
    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // https://en.wikipedia.org/wiki/Zipf's_law

    if len == 0 {
        return Vec::new();
    }

    let mut rng = new_rng();
    let dist = ZipfDistribution::new(len, exponent).unwrap();
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
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

    // Simulate a pre-existing sorted slice, where len - sorted_percent
    // elements are the new unsorted values.
    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;

    v[0..sorted_len].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    (0..len).map(|_| 66).collect::<Vec<_>>()
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect::<Vec<_>>()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect::<Vec<_>>()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunks_size) {
        chunk.sort_unstable();
    }

    vals
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunks_size) {
        chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
    }

    vals
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);
    let saw_directions = random_uniform((len / chunks_size) + 1, 0..=1);

    for (i, chunk) in vals.chunks_mut(chunks_size).enumerate() {
        if saw_directions[i] == 0 {
            chunk.sort_unstable();
        } else {
            chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals: Vec<i32> = Vec::with_capacity(len);

    for i in 0..(len / 2) {
        vals.push(i as i32);
    }
    for i in (len / 2)..len {
        vals.push((len - i) as i32);
    }

    vals
}

pub fn shuffled(len: usize) -> Vec<i32> {
    // A random permutation of 0..len, so the sorted result is the identity.

    let mut vals = ascending(len);
    vals.shuffle(&mut new_rng());
    vals
}

pub fn push_front(len: usize) -> Vec<i32> {
    // An ascending run with the smallest value appended at the end.

    if len == 0 {
        return Vec::new();
    }

    let mut vals: Vec<i32> = (1..len as i32).collect();
    vals.push(0);
    vals
}

pub fn push_middle(len: usize) -> Vec<i32> {
    // An ascending run with the middle value pulled out and appended.

    if len == 0 {
        return Vec::new();
    }

    let mid = (len / 2) as i32;
    let mut vals: Vec<i32> = (0..len as i32).filter(|&x| x != mid).collect();
    vals.push(mid);
    vals
}

pub fn random_init_seed() -> u64 {
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
    // We want a fuzzer-like exploration of the test space across runs, while
    // keeping crashes reproducible. The seconds since UNIX epoch / 10 are
    // easy to re-construct from CI log timestamps.

    use std::time::{SystemTime, UNIX_EPOCH};

    let epoch_seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    epoch_seconds / 10
}

#[cfg(miri)]
fn rand_root_seed() -> u64 {
    // Miri is usually run with isolation, which gives us repeatability but
    // also permutations based on other code that runs before.
    thread_rng().gen()
}

fn new_rng() -> XorShiftRng {
    rand::SeedableRng::seed_from_u64(random_init_seed())
}

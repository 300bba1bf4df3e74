use crate::geometry::Generation;

/// Drops the generations that sit strictly inside a run of identical
/// topology.
///
/// Within such a run every point moves linearly with the window size, so only
/// the first and last generation of the run are needed to reproduce the rest
/// by interpolation. The first and last generation overall are always kept.
#[must_use]
pub fn trim_generations(generations: Vec<Generation>) -> Vec<Generation> {
    let n = generations.len();
    if n <= 2 {
        return generations;
    }
    let states: Vec<_> = generations.iter().map(Generation::state).collect();

    let mut keep = vec![true; n];
    for k in (1..n - 1).rev() {
        keep[k] = states[k] != states[k - 1] || states[k] != states[k + 1];
    }

    generations
        .into_iter()
        .zip(keep)
        .filter_map(|(generation, keep)| keep.then_some(generation))
        .collect()
}

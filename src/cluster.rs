//! Ordering of colors for multi-stop gradients.
//!
//! A group of lights is drawn as a left to right linear gradient with
//! one stop per distinct color.  To avoid harsh transitions, colors
//! are chained by single-linkage clustering: the closest pair of
//! colors sitting at the ends of two different chains is joined
//! first, so neighbors in the final chain are as close as the greedy
//! merge allows.

use rgb::RGB8;
use serde::Serialize;
use tracing::debug;

/// Squared Euclidean distance between `a` and `b` in RGB space.
#[inline]
pub fn distance(a: RGB8, b: RGB8) -> u32 {
    let d = |x: u8, y: u8| { let d = i32::from(x) - i32::from(y);
                             (d * d) as u32 };
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

/// Chains of color indices.  Chains only ever grow by their ends and
/// an emptied chain is never reused.
struct Chains {
    chains: Vec<Vec<usize>>,
    chain_of: Vec<usize>, // chain_of[color] indexes `chains`
}

impl Chains {
    fn singletons(n: usize) -> Self {
        Chains { chains: (0 .. n).map(|i| vec![i]).collect(),
                 chain_of: (0 .. n).collect() }
    }

    fn is_end(&self, i: usize) -> bool {
        let c = &self.chains[self.chain_of[i]];
        c.first() == Some(&i) || c.last() == Some(&i)
    }

    /// Join the chain ending with `i` to the chain starting with `j`,
    /// reversing them as needed.  Return `false` if `i` and `j` are
    /// already linked or one of them is inside its chain.
    fn join(&mut self, i: usize, j: usize) -> bool {
        let (ci, cj) = (self.chain_of[i], self.chain_of[j]);
        if ci == cj || !self.is_end(i) || !self.is_end(j) { return false }
        if self.chains[ci].last() != Some(&i) { self.chains[ci].reverse() }
        let mut tail = std::mem::take(&mut self.chains[cj]);
        if tail.first() != Some(&j) { tail.reverse() }
        for &k in &tail { self.chain_of[k] = ci }
        self.chains[ci].append(&mut tail);
        true
    }
}

/// Return the indices of `colors` chained so that close colors are
/// adjacent.  `colors` are assumed pairwise distinct.
pub fn chain(colors: &[RGB8]) -> Vec<usize> {
    let n = colors.len();
    if n <= 1 { return (0 .. n).collect() }
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0 .. n {
        for j in i + 1 .. n {
            pairs.push((distance(colors[i], colors[j]), i, j));
        }
    }
    // Stable: equal distances keep the order of the colors.
    pairs.sort_by_key(|&(d, _, _)| d);
    let mut chains = Chains::singletons(n);
    let mut merges = 0;
    for (_, i, j) in pairs {
        if chains.join(i, j) {
            merges += 1;
            if merges == n - 1 { break }
        }
    }
    let root = chains.chain_of[0];
    std::mem::take(&mut chains.chains[root])
}

/// Order `colors` for a gradient.
///
/// Literal duplicates are merged, so the result holds each distinct
/// color once.  When all colors are identical there is nothing to
/// order and `colors` is returned as is, duplicates included.
///
/// # Example
///
/// ```
/// use hue_brewery::{RGB8, cluster::order};
/// let red = RGB8::new(255, 0, 0);
/// let blue = RGB8::new(0, 0, 255);
/// let dark_red = RGB8::new(200, 0, 0);
/// assert_eq!(order(&[red, blue, dark_red]), vec![blue, dark_red, red]);
/// ```
pub fn order(colors: &[RGB8]) -> Vec<RGB8> {
    let mut distinct: Vec<RGB8> = Vec::with_capacity(colors.len());
    for &c in colors {
        if !distinct.contains(&c) { distinct.push(c) }
    }
    if distinct.len() == 1 && colors.len() > 1 {
        debug!(n = colors.len(), "identical colors, gradient left unclustered");
        return colors.to_vec();
    }
    chain(&distinct).into_iter().map(|i| distinct[i]).collect()
}

/// A color anchored along a gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GradientStop {
    pub color: RGB8,
    /// Position in percent from the left edge.
    pub percent: u32,
}

/// Evenly spread `colors` on a gradient.  The step is rounded to a
/// whole percent, so the last stop may fall short of 100%.  Fewer
/// than two colors give no stops (the fill is solid).
pub fn gradient_stops(colors: &[RGB8]) -> Vec<GradientStop> {
    let n = colors.len();
    if n < 2 { return vec![] }
    let step = (100. / (n - 1) as f64).round() as u32;
    colors.iter().zip(0 ..)
        .map(|(&color, i)| GradientStop { color, percent: step * i })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
    const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };
    const DARK_RED: RGB8 = RGB8 { r: 200, g: 0, b: 0 };
    const NAVY: RGB8 = RGB8 { r: 0, g: 0, b: 200 };

    fn path_length(colors: &[RGB8]) -> u64 {
        colors.windows(2).map(|w| u64::from(distance(w[0], w[1]))).sum()
    }

    #[test]
    fn single_color_is_unchanged() {
        assert_eq!(order(&[RED]), vec![RED]);
        assert!(order(&[]).is_empty());
    }

    #[test]
    fn two_colors_keep_input_order() {
        assert_eq!(order(&[RED, BLUE]), vec![RED, BLUE]);
        assert_eq!(order(&[BLUE, RED]), vec![BLUE, RED]);
    }

    #[test]
    fn similar_colors_become_adjacent() {
        assert_eq!(order(&[RED, BLUE, DARK_RED, NAVY]),
                   vec![RED, DARK_RED, NAVY, BLUE]);
    }

    #[test]
    fn duplicates_are_merged() {
        assert_eq!(order(&[RED, RED, BLUE]), vec![RED, BLUE]);
        assert_eq!(order(&[BLUE, RED, BLUE, RED]), vec![BLUE, RED]);
    }

    #[test]
    fn identical_colors_fall_back_to_input() {
        assert_eq!(order(&[NAVY, NAVY, NAVY]), vec![NAVY; 3]);
    }

    #[test]
    fn interior_colors_are_not_rejoined() {
        // Once 1 sits between 0 and 2, `far` (closest to 1) can only
        // be attached at an end of the chain.
        let a = RGB8::new(100, 100, 100);
        let b = RGB8::new(110, 100, 100);
        let c = RGB8::new(120, 100, 100);
        let far = RGB8::new(110, 250, 100);
        let idx = chain(&[a, b, c, far]);
        assert_eq!(idx, [2, 1, 0, 3]);
    }

    #[test]
    fn random_sets_are_permuted_and_shortened() {
        let mut rng = StdRng::seed_from_u64(0x4875_65);
        let (mut ordered_total, mut input_total) = (0, 0);
        for _ in 0 .. 200 {
            let n = rng.gen_range(2 ..= 9);
            let colors: Vec<RGB8> = (0 .. n)
                .map(|_| RGB8::new(rng.gen(), rng.gen(), rng.gen()))
                .collect();
            let ordered = order(&colors);
            let mut expected = colors.clone();
            expected.sort_by_key(|c| (c.r, c.g, c.b));
            expected.dedup();
            let mut got = ordered.clone();
            got.sort_by_key(|c| (c.r, c.g, c.b));
            assert_eq!(got, expected);
            ordered_total += path_length(&ordered);
            input_total += path_length(&colors);
        }
        // Greedy chaining can lengthen a single set; only the sum is bounded.
        assert!(ordered_total <= input_total,
                "{ordered_total} > {input_total}");
    }

    #[test]
    fn stops_are_evenly_spread() {
        assert!(gradient_stops(&[RED]).is_empty());
        let p: Vec<u32> = gradient_stops(&[RED, BLUE]).iter()
            .map(|s| s.percent).collect();
        assert_eq!(p, [0, 100]);
        let p: Vec<u32> = gradient_stops(&[RED, BLUE, NAVY, DARK_RED]).iter()
            .map(|s| s.percent).collect();
        assert_eq!(p, [0, 33, 66, 99]);
        assert_eq!(gradient_stops(&[RED, BLUE])[1].color, BLUE);
    }
}

/// Iterator over the `r`-element combinations of `0..n`, as ascending index
/// lists, in lexicographic order.
///
/// # Examples
/// ```
/// use recipe_matcher::engine::combination::Combinations;
/// let all: Vec<Vec<usize>> = Combinations::new(3, 2).collect();
/// assert_eq!(all, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    /// `r == 0` or `r > n` yields nothing
    pub fn new(n: usize, r: usize) -> Self {
        Self {
            n,
            indices: (0..r).collect(),
            done: r == 0 || r > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        // advance: rightmost index that can still move
        let r = self.indices.len();
        let mut i = r;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] != i + self.n - r {
                self.indices[i] += 1;
                for j in i + 1..r {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }
        Some(current)
    }
}

/// C(n, r)
pub fn binomial(n: usize, r: usize) -> u128 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    (0..r).fold(1u128, |acc, i| acc * (n - i) as u128 / (i + 1) as u128)
}

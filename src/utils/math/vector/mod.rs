use std::cmp::Ordering;

use num::Float;
use serde::{Deserialize, Serialize};

/// ZeroSpVec is a sparse vector where zero is the implicit element.
/// It holds `indices` and `values` side by side;
/// indices are kept strictly ascending.
///
/// `len` is the logical dimension (vocabulary size for TF-IDF rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroSpVec<N> {
    len: usize,
    inds: Vec<usize>,
    vals: Vec<N>,
}

impl<N> ZeroSpVec<N>
where
    N: Float,
{
    /// Empty vector of dimension `len`
    #[inline]
    pub fn new(len: usize) -> Self {
        Self { len, inds: Vec::new(), vals: Vec::new() }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped, duplicated indices are summed.
    ///
    /// # Arguments
    /// * `len` - logical dimension
    /// * `pairs` - non-zero entries, every index must be `< len`
    pub fn from_pairs(len: usize, mut pairs: Vec<(usize, N)>) -> Self {
        pairs.sort_by_key(|(idx, _)| *idx);
        let mut inds: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut vals: Vec<N> = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            debug_assert!(idx < len, "index {idx} out of dimension {len}");
            match inds.last() {
                Some(&last) if last == idx => {
                    if let Some(v) = vals.last_mut() {
                        *v = *v + val;
                    }
                }
                _ => {
                    inds.push(idx);
                    vals.push(val);
                }
            }
        }
        let mut vec = Self { len, inds, vals };
        vec.drop_zeros();
        vec
    }

    fn drop_zeros(&mut self) {
        let mut w = 0;
        for r in 0..self.vals.len() {
            if !self.vals[r].is_zero() {
                self.inds[w] = self.inds[r];
                self.vals[w] = self.vals[r];
                w += 1;
            }
        }
        self.inds.truncate(w);
        self.vals.truncate(w);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of non-zero entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Value at `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&index) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate the non-zero entries in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64
    where
        N: Into<f64>,
    {
        self.vals
            .iter()
            .map(|v| {
                let v: f64 = (*v).into();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Scale to unit length. A zero vector stays zero.
    pub fn normalize_l2(&mut self)
    where
        N: Into<f64>,
    {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        let Some(inv) = num::cast::<f64, N>(1.0 / norm) else {
            return;
        };
        for v in &mut self.vals {
            *v = *v * inv;
        }
    }

    /// Dot product by merging the two sorted index lists
    /// d(a, b) = Σ(a_i * b_i)
    pub fn dot(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut dot = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    dot += va.into() * vb.into();
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        dot
    }

    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn from_pairs_sorts_merges_and_drops_zeros() {
        let v = ZeroSpVec::<f64>::from_pairs(6, vec![(4, 1.0), (1, 2.0), (4, 0.5), (3, 0.0)]);
        assert_eq!(v.len(), 6);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.raw_iter().collect::<Vec<_>>(), vec![(1, 2.0), (4, 1.5)]);
        assert_eq!(v.get(3), Some(0.0));
        assert_eq!(v.get(6), None);
    }

    #[test]
    fn dot_only_counts_shared_dimensions() {
        let a = ZeroSpVec::<f64>::from_pairs(5, vec![(0, 1.0), (2, 3.0), (4, 2.0)]);
        let b = ZeroSpVec::<f64>::from_pairs(5, vec![(1, 7.0), (2, 2.0), (4, 0.5)]);
        assert!(approx(a.dot(&b), 7.0));
    }

    #[test]
    fn normalized_dot_is_cosine() {
        // cos((3, 4, 0), (0, 1, 0)) = 4 / 5
        let mut a = ZeroSpVec::<f32>::from_pairs(3, vec![(0, 3.0), (1, 4.0)]);
        let mut b = ZeroSpVec::<f32>::from_pairs(3, vec![(1, 1.0)]);
        a.normalize_l2();
        b.normalize_l2();
        assert!((a.norm() - 1.0).abs() < 1e-6);
        assert!((a.dot(&b) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_stays_zero() {
        let mut zero = ZeroSpVec::<f64>::new(4);
        zero.normalize_l2();
        let other = ZeroSpVec::<f64>::from_pairs(4, vec![(2, 1.0)]);
        assert_eq!(zero.nnz(), 0);
        assert_eq!(zero.dot(&other), 0.0);
    }
}

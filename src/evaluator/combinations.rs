/// Iterator over all `K`-element index combinations of `0..n`, in lexicographic order.
///
/// With `n = 7, K = 5` this yields the C(7,5) = 21 five-card subsets of a showdown hand.
/// When `K > n` the iterator is empty.
pub struct Combinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    pub fn new(n: usize) -> Self {
        let mut indices = [0usize; K];
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i;
        }
        Self { n, indices, done: K > n }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can be incremented
        let mut i = K;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - K + i {
                self.indices[i] += 1;
                // Reset all indices to the right
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seven_choose_five_generates_21_unique_combinations() {
        let combos: Vec<[usize; 5]> = Combinations::<5>::new(7).collect();
        assert_eq!(combos.len(), 21);
        let unique: HashSet<[usize; 5]> = combos.iter().copied().collect();
        assert_eq!(unique.len(), 21);
    }

    #[test]
    fn combinations_are_strictly_increasing_and_in_range() {
        for combo in Combinations::<5>::new(7) {
            assert!(combo.iter().all(|&i| i < 7));
            assert!(combo.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn lexicographic_order() {
        let combos: Vec<[usize; 5]> = Combinations::<5>::new(7).collect();
        assert_eq!(combos.first(), Some(&[0, 1, 2, 3, 4]));
        assert_eq!(combos.last(), Some(&[2, 3, 4, 5, 6]));
        assert!(combos.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn other_sizes() {
        assert_eq!(Combinations::<5>::new(5).count(), 1);
        assert_eq!(Combinations::<5>::new(6).count(), 6);
        assert_eq!(Combinations::<5>::new(4).count(), 0);
        assert_eq!(Combinations::<2>::new(4).count(), 6);
    }
}

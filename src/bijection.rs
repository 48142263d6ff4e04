/// A permutation of facelet positions, the effect of a turn or of a whole
/// move sequence on where stickers end up.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub struct Bijection(
    // The indices of this vector are the new (output side) indexes.
    // The values are the old (input side) indexes to pull from.
    pub Vec<usize>,
);

impl Bijection {
    pub fn identity(count: usize) -> Bijection {
        Bijection((0..count).collect())
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(new, old)| new == *old)
    }

    /// This permutation followed by `then`.
    pub fn apply(&self, then: &Bijection) -> Bijection {
        Bijection(then.permute(&self.0))
    }

    pub fn invert(&self) -> Bijection {
        let mut inverted = vec![0; self.0.len()];
        for (new, old) in self.0.iter().enumerate() {
            inverted[*old] = new;
        }
        Bijection(inverted)
    }

    /// This permutation performed `times` times in a row.
    pub fn repeat(&self, times: usize) -> Bijection {
        (0..times).fold(Bijection::identity(self.0.len()), |combined, _| {
            combined.apply(self)
        })
    }

    /// Moves `items` through the permutation: output slot `i` receives
    /// `items[self.0[i]]`.
    pub fn permute<T: Copy>(&self, items: &[T]) -> Vec<T> {
        self.0.iter().map(|old| items[*old]).collect()
    }
}

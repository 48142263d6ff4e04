use rand::distributions::Uniform;
use rand::Rng;

use crate::face::Face;
use crate::moves::{Amount, Move, MoveSequence};

/// Random moves from all 18 turns, never turning the same face twice in a
/// row (two turns of one face are really a single turn).
pub fn generate_scramble<R: Rng>(length: usize, rng: &mut R) -> MoveSequence {
    let other_faces = Uniform::new(0, Face::ALL.len() - 1);
    let amounts = Uniform::new(0, Amount::ALL.len());

    let mut moves = MoveSequence::new();
    let mut previous: Option<Face> = None;
    for _ in 0..length {
        let face = match previous {
            // skip over the previous face
            Some(previous) => {
                let i = rng.sample(other_faces);
                Face::from_index(if i >= previous.index() { i + 1 } else { i })
            }
            None => Face::from_index(rng.sample(Uniform::new(0, Face::ALL.len()))),
        };
        moves.push(Move::new(face, Amount::ALL[rng.sample(amounts)]));
        previous = Some(face);
    }
    moves
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::cube_state::CubeState;

    #[test]
    fn test_length_and_no_repeated_faces() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for length in [1, 2, 25, 100] {
            let moves = generate_scramble(length, &mut rng);
            assert_eq!(moves.len(), length);
            for pair in moves.as_slice().windows(2) {
                assert_ne!(pair[0].face, pair[1].face);
            }
        }
    }

    #[test]
    fn test_empty_scramble() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let moves = generate_scramble(0, &mut rng);
        assert!(moves.is_empty());
        let state = CubeState::solved(3).unwrap().apply_sequence(&moves);
        assert!(state.is_solved());
    }

    #[test]
    fn test_same_seed_same_scramble() {
        let first = generate_scramble(25, &mut ChaCha8Rng::seed_from_u64(42));
        let second = generate_scramble(25, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_uses_every_face_and_amount() {
        let moves = generate_scramble(500, &mut ChaCha8Rng::seed_from_u64(3));
        for mv in Move::all() {
            assert!(moves.iter().any(|m| *m == mv), "{} never chosen", mv);
        }
    }
}

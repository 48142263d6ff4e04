use cube_solver::{
    generate_scramble, Algorithm, CubeSession, CubeSolver, CubeState, Move, MoveSequence,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn scrambled(size: usize, seed: u64) -> (MoveSequence, CubeState) {
    let scramble = generate_scramble(25, &mut ChaCha8Rng::seed_from_u64(seed));
    let state = CubeState::solved(size).unwrap().apply_sequence(&scramble);
    (scramble, state)
}

fn assert_solves(size: usize, seed: u64, algorithm: Algorithm) {
    let (scramble, state) = scrambled(size, seed);
    let solution = CubeSolver::default()
        .solve(&state, algorithm)
        .unwrap_or_else(|err| panic!("{}x{} {} after {}: {}", size, size, algorithm, scramble, err));
    assert!(
        state.apply_sequence(&solution.moves).is_solved(),
        "{}x{} {} after {}",
        size,
        size,
        algorithm,
        scramble
    );
    assert!(!solution.moves.is_empty());
    assert!(solution.moves.len() <= solution.unoptimized_length);
    assert!(solution.unoptimized_length <= solution.move_ceiling);
}

#[test]
fn test_3x3_advanced() {
    for seed in 0..5 {
        assert_solves(3, seed, Algorithm::Advanced);
    }
}

#[test]
fn test_3x3_beginner() {
    for seed in 0..5 {
        assert_solves(3, seed, Algorithm::Beginner);
    }
}

#[test]
fn test_2x2() {
    for seed in 0..5 {
        assert_solves(2, seed, Algorithm::Advanced);
    }
}

#[test]
fn test_big_cubes() {
    assert_solves(4, 1, Algorithm::Advanced);
    assert_solves(5, 2, Algorithm::Reduction);
    assert_solves(6, 3, Algorithm::Beginner);
    assert_solves(7, 4, Algorithm::Advanced);
}

#[test]
fn test_beginner_takes_more_stages() {
    let (_, state) = scrambled(3, 9);
    let solver = CubeSolver::default();
    let advanced = solver.solve(&state, Algorithm::Advanced).unwrap();
    let beginner = solver.solve(&state, Algorithm::Beginner).unwrap();
    assert_eq!(advanced.stages.len(), 5);
    assert_eq!(beginner.stages.len(), 7);
    // both start with the same cross
    assert_eq!(advanced.stages[0], beginner.stages[0]);
}

#[test]
fn test_session_round_trip() {
    let mut session = CubeSession::new(3).unwrap();
    session.apply_moves("R U R' U' F2 D").unwrap();
    let json = session.save().unwrap();

    let mut restored = CubeSession::new(2).unwrap();
    restored.load(&json).unwrap();
    assert_eq!(restored.state(), session.state());
    restored.solve("kociemba").unwrap();
    assert!(restored.is_solved());
}

fn moves(max_len: usize) -> impl Strategy<Value = MoveSequence> {
    let all: Vec<Move> = Move::all().collect();
    prop::collection::vec(prop::sample::select(all), 0..max_len).prop_map(MoveSequence::from)
}

proptest! {
    #[test]
    fn prop_colors_are_conserved(size in 2usize..=7, sequence in moves(40)) {
        let state = CubeState::solved(size).unwrap().apply_sequence(&sequence);
        let expected = size * size;
        prop_assert_eq!(state.color_counts(), [expected; 6]);
        prop_assert!(state.validate().is_ok());
    }

    #[test]
    fn prop_inverse_undoes(size in 2usize..=5, sequence in moves(30)) {
        let solved = CubeState::solved(size).unwrap();
        let there = solved.apply_sequence(&sequence);
        prop_assert_eq!(there.apply_sequence(&sequence.inverse()), solved.clone());
        prop_assert_eq!(solved.apply_sequence(&sequence.concat(&sequence.inverse())), solved);
    }

    #[test]
    fn prop_optimizing_keeps_the_effect(sequence in moves(30)) {
        let solved = CubeState::solved(3).unwrap();
        let optimized = sequence.optimized();
        prop_assert!(optimized.len() <= sequence.len());
        prop_assert_eq!(solved.apply_sequence(&optimized), solved.apply_sequence(&sequence));
        for pair in optimized.as_slice().windows(2) {
            prop_assert_ne!(pair[0].face, pair[1].face);
        }
    }

    #[test]
    fn prop_single_moves(mv in prop::sample::select(Move::all().collect::<Vec<_>>())) {
        let solved = CubeState::solved(3).unwrap();
        let once = solved.apply(mv);
        prop_assert!(!once.is_solved());
        prop_assert_eq!(once.apply(mv.inverse()), solved);
    }
}

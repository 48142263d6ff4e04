use log::{debug, error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::Config;
use crate::cube_state::{CubeState, Snapshot};
use crate::error::CubeError;
use crate::moves::{Move, MoveSequence};
use crate::scramble::generate_scramble;
use crate::solver::{Algorithm, CubeSolver, SearchHook, Solution, YieldNow};

/// The saved form of a session: the cube's faces plus the moves made so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    #[serde(default)]
    pub history: MoveSequence,
}

/// One cube and everything done to it, as driven by a user interface.
///
/// Every operation checks its input before touching the cube, so a
/// rejected call leaves the session as it was. Once the cube fails a
/// consistency check the session is poisoned: later mutating calls return
/// that same error until the cube is replaced by [`CubeSession::new_cube`],
/// [`CubeSession::reset`] or [`CubeSession::load`].
pub struct CubeSession {
    state: CubeState,
    history: MoveSequence,
    poisoned: Option<Corruption>,
    config: Config,
    solver: CubeSolver,
    rng: ChaCha8Rng,
}

impl CubeSession {
    pub fn new(size: usize) -> Result<Self, CubeError> {
        Self::with_config(size, Config::default())
    }

    pub fn with_config(size: usize, config: Config) -> Result<Self, CubeError> {
        let state = CubeState::solved(size)?;
        let rng = match config.scramble.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(CubeSession {
            state,
            history: MoveSequence::new(),
            poisoned: None,
            solver: CubeSolver::new(config.solver.clone()),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the cube with a solved one of another size.
    pub fn new_cube(&mut self, size: usize) -> Result<&CubeState, CubeError> {
        let state = CubeState::solved(size)?;
        info!("new {}x{} cube", size, size);
        self.replace(state, MoveSequence::new());
        Ok(&self.state)
    }

    /// Back to a solved cube of the same size.
    pub fn reset(&mut self) -> &CubeState {
        let size = self.state.size();
        self.replace(self.state.puzzle().get_initial_state(), MoveSequence::new());
        debug!("reset {}x{} cube", size, size);
        &self.state
    }

    /// Applies random moves, `length` of them or the configured default.
    pub fn scramble(&mut self, length: Option<usize>) -> Result<MoveSequence, CubeError> {
        self.check_poisoned()?;
        let length = length.unwrap_or(self.config.scramble.default_length);
        let moves = generate_scramble(length, &mut self.rng);
        debug!("scramble: {}", moves);
        self.commit(&moves)?;
        Ok(moves)
    }

    pub fn apply_move(&mut self, token: &str) -> Result<&CubeState, CubeError> {
        self.check_poisoned()?;
        let mv: Move = token.trim().parse()?;
        self.commit(&MoveSequence::from(vec![mv]))?;
        Ok(&self.state)
    }

    /// Applies space separated moves; a bad token rejects the whole list.
    pub fn apply_moves(&mut self, tokens: &str) -> Result<&CubeState, CubeError> {
        self.check_poisoned()?;
        let moves: MoveSequence = tokens.parse()?;
        self.commit(&moves)?;
        Ok(&self.state)
    }

    /// Solves the cube and applies the solution.
    ///
    /// When a stage fails, the moves of the stages before it stay applied
    /// and the error lists them.
    pub fn solve(&mut self, algorithm: &str) -> Result<Solution, CubeError> {
        self.solve_with_hook(algorithm, &mut YieldNow)
    }

    pub fn solve_with_hook<H: SearchHook>(
        &mut self,
        algorithm: &str,
        hook: &mut H,
    ) -> Result<Solution, CubeError> {
        self.check_poisoned()?;
        let algorithm: Algorithm = algorithm.parse()?;
        match self.solver.solve_with_hook(&self.state, algorithm, hook) {
            Ok(solution) => {
                self.commit(&solution.moves)?;
                Ok(solution)
            }
            Err(CubeError::SolveFailed { stage, partial }) => {
                error!("solve failed at {} after {} moves", stage, partial.len());
                self.commit(&partial)?;
                Err(CubeError::SolveFailed { stage, partial })
            }
            Err(err @ CubeError::StateCorruption { .. }) => Err(self.poison(err)),
            Err(err) => Err(err),
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    pub fn history(&self) -> &MoveSequence {
        &self.history
    }

    /// Checks the cube's colors, poisoning the session if they are off.
    pub fn validate(&mut self) -> Result<(), CubeError> {
        self.check_poisoned()?;
        self.state.validate().map_err(|err| self.poison(err))
    }

    pub fn save(&self) -> Result<String, CubeError> {
        let saved = SavedSession {
            snapshot: self.state.snapshot(),
            history: self.history.clone(),
        };
        Ok(serde_json::to_string(&saved)?)
    }

    /// Replaces the cube with a saved one. The cube is rebuilt from its
    /// faces; the history is kept as a record.
    pub fn load(&mut self, json: &str) -> Result<&CubeState, CubeError> {
        let saved: SavedSession = serde_json::from_str(json)?;
        let state = CubeState::from_snapshot(&saved.snapshot)?;
        info!("loaded {}x{} cube", state.size(), state.size());
        self.replace(state, saved.history);
        Ok(&self.state)
    }

    fn replace(&mut self, state: CubeState, history: MoveSequence) {
        self.state = state;
        self.history = history;
        self.poisoned = None;
    }

    fn commit(&mut self, moves: &MoveSequence) -> Result<(), CubeError> {
        self.state = self.state.apply_sequence(moves);
        self.history.extend_from(moves);
        self.state.validate().map_err(|err| self.poison(err))
    }

    fn poison(&mut self, err: CubeError) -> CubeError {
        if let CubeError::StateCorruption {
            color,
            count,
            expected,
        } = err
        {
            error!("cube state is corrupted: {}", err);
            self.poisoned = Some(Corruption {
                color,
                count,
                expected,
            });
        }
        err
    }

    fn check_poisoned(&self) -> Result<(), CubeError> {
        match self.poisoned {
            Some(Corruption {
                color,
                count,
                expected,
            }) => Err(CubeError::StateCorruption {
                color,
                count,
                expected,
            }),
            None => Ok(()),
        }
    }
}

// the failed check that poisoned a session
#[derive(Debug, Clone, Copy)]
struct Corruption {
    color: Color,
    count: usize,
    expected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrambleOpts;
    use crate::face::Face;

    fn seeded(size: usize) -> CubeSession {
        let config = Config {
            scramble: ScrambleOpts {
                seed: Some(11),
                ..ScrambleOpts::default()
            },
            ..Config::default()
        };
        CubeSession::with_config(size, config).unwrap()
    }

    fn corrupt(session: &mut CubeSession) {
        let mut facelets = session.state.facelets().to_vec();
        facelets[0] = facelets[facelets.len() - 1];
        session.state = CubeState::from_parts(session.state.size(), facelets);
    }

    #[test]
    fn test_scramble_then_solve() {
        let mut session = seeded(3);
        let scramble = session.scramble(None).unwrap();
        assert_eq!(scramble.len(), 25);
        assert!(!session.is_solved());
        let solution = session.solve("advanced").unwrap();
        assert!(session.is_solved());
        assert_eq!(session.history().len(), 25 + solution.moves.len());
    }

    #[test]
    fn test_invalid_input_changes_nothing() {
        let mut session = seeded(3);
        session.apply_moves("R U").unwrap();
        let before = session.state().clone();

        assert!(matches!(
            session.apply_move("Q"),
            Err(CubeError::InvalidMoveToken(token)) if token == "Q"
        ));
        assert!(session.apply_moves("R U X2 F").is_err());
        assert!(matches!(session.new_cube(8), Err(CubeError::InvalidSizeRequest(8))));
        assert!(matches!(session.new_cube(1), Err(CubeError::InvalidSizeRequest(1))));
        assert!(matches!(
            session.solve("fridrich"),
            Err(CubeError::UnknownAlgorithm(_))
        ));

        assert_eq!(session.state(), &before);
        assert_eq!(session.history().to_string(), "R U");
    }

    #[test]
    fn test_new_cube_and_reset() {
        let mut session = seeded(3);
        session.apply_move("F").unwrap();
        assert_eq!(session.new_cube(5).unwrap().size(), 5);
        assert!(session.is_solved());
        assert!(session.history().is_empty());

        session.scramble(Some(4)).unwrap();
        assert_eq!(session.history().len(), 4);
        session.reset();
        assert!(session.is_solved());
        assert_eq!(session.state().size(), 5);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_scramble_zero_leaves_cube_solved() {
        let mut session = seeded(4);
        assert!(session.scramble(Some(0)).unwrap().is_empty());
        assert!(session.is_solved());
    }

    #[test]
    fn test_corruption_poisons_the_session() {
        let mut session = seeded(3);
        corrupt(&mut session);
        assert!(matches!(session.validate(), Err(CubeError::StateCorruption { .. })));
        assert!(matches!(session.apply_move("R"), Err(CubeError::StateCorruption { .. })));
        assert!(matches!(session.scramble(None), Err(CubeError::StateCorruption { .. })));
        assert!(matches!(session.solve("beginner"), Err(CubeError::StateCorruption { .. })));
        assert!(session.history().is_empty());

        session.reset();
        assert!(session.validate().is_ok());
        session.apply_move("R").unwrap();
    }

    #[test]
    fn test_solving_a_corrupted_cube_poisons_too() {
        let mut session = seeded(3);
        corrupt(&mut session);
        assert!(session.solve("advanced").is_err());
        assert!(matches!(session.apply_move("U"), Err(CubeError::StateCorruption { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let mut session = seeded(3);
        session.apply_moves("R U2 F'").unwrap();
        let json = session.save().unwrap();

        let mut other = seeded(2);
        other.load(&json).unwrap();
        assert_eq!(other.state(), session.state());
        assert_eq!(other.history().to_string(), "R U2 F'");

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], 3);
        assert_eq!(value["history"], "R U2 F'");
        assert_eq!(value["faces"]["U"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_load_rejects_bad_snapshots() {
        let mut session = seeded(3);
        let mut saved = SavedSession {
            snapshot: CubeState::solved(3).unwrap().snapshot(),
            history: MoveSequence::new(),
        };
        saved.snapshot.faces.insert(Face::U, vec!["WWW".into(), "WWW".into(), "WWY".into()]);
        let json = serde_json::to_string(&saved).unwrap();
        assert!(session.load(&json).is_err());
        assert!(matches!(session.load("not json"), Err(CubeError::Serialization(_))));
        assert!(session.is_solved());
        assert_eq!(session.state().size(), 3);
    }
}

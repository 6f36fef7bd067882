//! The contract expected of game-playing fitness functions.
//!
//! No game is played here: implementors pit two genomes
//! against each other and report a [`GameOutcome`], which
//! an outer selection loop can turn into scores.

use crate::genomics::Genome;

use serde::{Deserialize, Serialize};

/// Result of a game between two genomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl GameOutcome {
    /// Points earned by the first and second player:
    /// 1 for a win, ½ for a draw.
    ///
    /// # Examples
    /// ```
    /// use chessnet::evaluation::GameOutcome;
    ///
    /// assert_eq!(GameOutcome::SecondWins.scores(), (0.0, 1.0));
    /// assert_eq!(GameOutcome::Draw.scores(), (0.5, 0.5));
    /// ```
    pub fn scores(self) -> (f32, f32) {
        match self {
            GameOutcome::FirstWins => (1.0, 0.0),
            GameOutcome::SecondWins => (0.0, 1.0),
            GameOutcome::Draw => (0.5, 0.5),
        }
    }

    /// Returns the winning genome, if any.
    pub fn winner<'a>(self, first: &'a Genome, second: &'a Genome) -> Option<&'a Genome> {
        match self {
            GameOutcome::FirstWins => Some(first),
            GameOutcome::SecondWins => Some(second),
            GameOutcome::Draw => None,
        }
    }
}

/// Plays a game between two genomes.
///
/// Implemented for any `FnMut(&Genome, &Genome) -> GameOutcome`.
///
/// # Examples
/// ```
/// use chessnet::evaluation::{Evaluator, GameOutcome};
/// use chessnet::genomics::Genome;
///
/// let mut rng = rand::thread_rng();
/// let a = Genome::initialize(1, 1, 0, 1, &mut rng).unwrap();
/// let b = Genome::initialize(1, 1, 0, 1, &mut rng).unwrap();
///
/// // Larger first bias wins.
/// let mut evaluator = |x: &Genome, y: &Genome| {
///     if x.biases()[0][0] > y.biases()[0][0] {
///         GameOutcome::FirstWins
///     } else {
///         GameOutcome::SecondWins
///     }
/// };
/// let outcome = evaluator.play(&a, &b);
/// assert_ne!(outcome, GameOutcome::Draw);
/// ```
pub trait Evaluator {
    fn play(&mut self, first: &Genome, second: &Genome) -> GameOutcome;
}

impl<F> Evaluator for F
where
    F: FnMut(&Genome, &Genome) -> GameOutcome,
{
    fn play(&mut self, first: &Genome, second: &Genome) -> GameOutcome {
        self(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct AlwaysDraw {
        games: usize,
    }

    impl Evaluator for AlwaysDraw {
        fn play(&mut self, _: &Genome, _: &Genome) -> GameOutcome {
            self.games += 1;
            GameOutcome::Draw
        }
    }

    #[test]
    fn scores_sum_to_one() {
        for outcome in [
            GameOutcome::FirstWins,
            GameOutcome::SecondWins,
            GameOutcome::Draw,
        ] {
            let (first, second) = outcome.scores();
            assert_eq!(first + second, 1.0);
        }
    }

    #[test]
    fn winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let a = Genome::initialize(2, 2, 1, 2, &mut rng).unwrap();
        let b = Genome::initialize(2, 2, 1, 2, &mut rng).unwrap();
        assert_eq!(GameOutcome::FirstWins.winner(&a, &b), Some(&a));
        assert_eq!(GameOutcome::SecondWins.winner(&a, &b), Some(&b));
        assert_eq!(GameOutcome::Draw.winner(&a, &b), None);
    }

    #[test]
    fn evaluators() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = Genome::initialize(2, 2, 1, 2, &mut rng).unwrap();
        let b = Genome::initialize(2, 2, 1, 2, &mut rng).unwrap();

        let mut counter = AlwaysDraw { games: 0 };
        counter.play(&a, &b);
        counter.play(&b, &a);
        assert_eq!(counter.games, 2);

        let mut played = vec![];
        let mut recorder = |x: &Genome, _: &Genome| {
            played.push(x.clone());
            GameOutcome::FirstWins
        };
        assert_eq!(recorder.play(&a, &b), GameOutcome::FirstWins);
        assert_eq!(played, vec![a]);
    }
}

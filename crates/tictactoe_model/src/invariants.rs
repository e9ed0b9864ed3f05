//! First-class invariants for the game model.
//!
//! Invariants are logical properties every reachable [`Game`] satisfies.
//! They back the move postcondition and reject impossible snapshots.

use crate::Game;
use crate::rules::mark_counts;
use crate::types::Player;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Joins violations into a single line for error messages.
pub fn describe_violations(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: X has as many marks as O, or exactly one more.
pub struct BalancedMarks;

impl Invariant<Game> for BalancedMarks {
    fn holds(game: &Game) -> bool {
        let (x, o) = mark_counts(game.grid());
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X marks minus O marks is 0 or 1"
    }
}

/// Invariant: X is to move exactly when both players have the same number of marks.
pub struct TurnMatchesMarks;

impl Invariant<Game> for TurnMatchesMarks {
    fn holds(game: &Game) -> bool {
        let (x, o) = mark_counts(game.grid());
        (game.current_turn() == Player::X) == (x == o)
    }

    fn description() -> &'static str {
        "X is to move iff mark counts are equal"
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (BalancedMarks, TurnMatchesMarks);

use super::*;
use duel_core::GUESS_BUDGET;
use duel_core::GUESS_MAX;
use duel_core::GUESS_MIN;
use duel_core::Seat;
use serde::Serialize;

/// Feedback for a guess, relative to the secret target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hint {
    Higher,
    Lower,
    Correct,
}

/// Number-Guessing match state.
///
/// Seat 0 supplies the secret target exactly once, before any guesses
/// are accepted; seat 1 spends a bounded guess budget chasing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberGuessing {
    target: Option<u32>,
    guesses: Vec<(u32, Hint)>,
}

impl NumberGuessing {
    pub fn new() -> Self {
        Self {
            target: None,
            guesses: Vec::new(),
        }
    }
    pub fn target(&self) -> Option<u32> {
        self.target
    }
    /// Every guess so far, with the hint each one earned.
    pub fn guesses(&self) -> &[(u32, Hint)] {
        &self.guesses
    }
    pub fn remaining(&self) -> usize {
        GUESS_BUDGET.saturating_sub(self.guesses.len())
    }
    /// Set the secret target. Seat 0 only, once, in the declared range.
    pub fn set_target(&self, seat: Seat, value: u32) -> Result<Self, RuleViolation> {
        if self.terminal().is_some() {
            return Err(RuleViolation::Terminal);
        }
        if seat != 0 {
            return Err(RuleViolation::OutOfTurn);
        }
        if self.target.is_some() {
            return Err(RuleViolation::TargetAlreadySet);
        }
        if !(GUESS_MIN..=GUESS_MAX).contains(&value) {
            return Err(RuleViolation::OutOfRange(value));
        }
        let mut next = self.clone();
        next.target = Some(value);
        Ok(next)
    }
    /// Spend one guess. Seat 1 only, after the target exists.
    pub fn guess(&self, seat: Seat, value: u32) -> Result<Self, RuleViolation> {
        if self.terminal().is_some() {
            return Err(RuleViolation::Terminal);
        }
        if seat != 1 {
            return Err(RuleViolation::OutOfTurn);
        }
        let target = self.target.ok_or(RuleViolation::TargetNotSet)?;
        if !(GUESS_MIN..=GUESS_MAX).contains(&value) {
            return Err(RuleViolation::OutOfRange(value));
        }
        let hint = match value.cmp(&target) {
            std::cmp::Ordering::Less => Hint::Higher,
            std::cmp::Ordering::Greater => Hint::Lower,
            std::cmp::Ordering::Equal => Hint::Correct,
        };
        let mut next = self.clone();
        next.guesses.push((value, hint));
        Ok(next)
    }
    /// An exact match wins for the guesser; an exhausted budget draws.
    pub fn terminal(&self) -> Option<Outcome> {
        if self.guesses.iter().any(|(_, h)| *h == Hint::Correct) {
            return Some(Outcome::Winner(1));
        }
        if self.guesses.len() >= GUESS_BUDGET {
            return Some(Outcome::Draw);
        }
        None
    }
}

impl Default for NumberGuessing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn hints_lead_the_guesser_to_the_target() {
        let state = NumberGuessing::new().set_target(0, 50).unwrap();
        let state = state.guess(1, 25).unwrap();
        assert_eq!(state.guesses().last(), Some(&(25, Hint::Higher)));
        let state = state.guess(1, 75).unwrap();
        assert_eq!(state.guesses().last(), Some(&(75, Hint::Lower)));
        let state = state.guess(1, 50).unwrap();
        assert_eq!(state.guesses().last(), Some(&(50, Hint::Correct)));
        assert_eq!(state.terminal(), Some(Outcome::Winner(1)));
        assert_eq!(state.guesses().len(), 3);
    }
    #[test]
    fn seventh_miss_draws() {
        let state = NumberGuessing::new().set_target(0, 99).unwrap();
        let state = (1..=7).fold(state, |s, v| s.guess(1, v).unwrap());
        assert_eq!(state.terminal(), Some(Outcome::Draw));
        assert_eq!(state.remaining(), 0);
    }
    #[test]
    fn target_is_set_once() {
        let state = NumberGuessing::new().set_target(0, 10).unwrap();
        assert_eq!(
            state.set_target(0, 20),
            Err(RuleViolation::TargetAlreadySet)
        );
    }
    #[test]
    fn only_the_first_joiner_sets_the_target() {
        assert_eq!(
            NumberGuessing::new().set_target(1, 10),
            Err(RuleViolation::OutOfTurn)
        );
    }
    #[test]
    fn guessing_waits_for_the_target() {
        assert_eq!(
            NumberGuessing::new().guess(1, 10),
            Err(RuleViolation::TargetNotSet)
        );
    }
    #[test]
    fn range_is_enforced() {
        let state = NumberGuessing::new();
        assert_eq!(state.set_target(0, 0), Err(RuleViolation::OutOfRange(0)));
        assert_eq!(state.set_target(0, 101), Err(RuleViolation::OutOfRange(101)));
        let state = state.set_target(0, 50).unwrap();
        assert_eq!(state.guess(1, 0), Err(RuleViolation::OutOfRange(0)));
    }
    #[test]
    fn the_setter_cannot_guess() {
        let state = NumberGuessing::new().set_target(0, 50).unwrap();
        assert_eq!(state.guess(0, 50), Err(RuleViolation::OutOfTurn));
    }
}

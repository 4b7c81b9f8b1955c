use super::*;
use duel_core::ROUND_LIMIT;
use duel_core::ROUND_TARGET;
use duel_core::SEATS;
use duel_core::Seat;
use serde::Deserialize;
use serde::Serialize;

/// A Rock-Paper-Scissors throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Classic cycle: rock beats scissors, scissors beats paper,
    /// paper beats rock.
    pub fn beats(&self, other: &Choice) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors)
                | (Self::Scissors, Self::Paper)
                | (Self::Paper, Self::Rock)
        )
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rock => write!(f, "rock"),
            Self::Paper => write!(f, "paper"),
            Self::Scissors => write!(f, "scissors"),
        }
    }
}

/// A resolved round: both throws and the round winner, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub choices: [Choice; SEATS],
    pub winner: Option<Seat>,
}

/// Rock-Paper-Scissors match state.
///
/// Both seats act independently each round; a round resolves only once
/// both choices are in. Ties replay the round but still consume it for
/// the round-limit check, so the match never extends past the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RockPaperScissors {
    scores: [u8; SEATS],
    round: u8,
    pending: [Option<Choice>; SEATS],
    last: Option<RoundResult>,
}

impl RockPaperScissors {
    pub fn new() -> Self {
        Self {
            scores: [0; SEATS],
            round: 1,
            pending: [None; SEATS],
            last: None,
        }
    }
    pub fn scores(&self) -> &[u8; SEATS] {
        &self.scores
    }
    /// Current round number, 1-based.
    pub fn round(&self) -> u8 {
        self.round
    }
    pub fn has_chosen(&self, seat: Seat) -> bool {
        self.pending.get(seat).map(Option::is_some).unwrap_or(false)
    }
    /// The most recently resolved round.
    pub fn last(&self) -> Option<&RoundResult> {
        self.last.as_ref()
    }
    /// Submit a throw for the current round. Resolves the round once
    /// both seats have submitted.
    pub fn apply(&self, seat: Seat, choice: Choice) -> Result<Self, RuleViolation> {
        if self.terminal().is_some() {
            return Err(RuleViolation::Terminal);
        }
        if self.pending[seat].is_some() {
            return Err(RuleViolation::AlreadyChosen);
        }
        let mut next = self.clone();
        next.pending[seat] = Some(choice);
        if let [Some(a), Some(b)] = next.pending {
            let winner = if a.beats(&b) {
                Some(0)
            } else if b.beats(&a) {
                Some(1)
            } else {
                None
            };
            if let Some(seat) = winner {
                next.scores[seat] += 1;
            }
            next.last = Some(RoundResult {
                choices: [a, b],
                winner,
            });
            next.round += 1;
            next.pending = [None; SEATS];
        }
        Ok(next)
    }
    /// First to [`ROUND_TARGET`] round-wins ends the match early;
    /// otherwise the score decides once [`ROUND_LIMIT`] rounds are played.
    pub fn terminal(&self) -> Option<Outcome> {
        if self.scores[0] >= ROUND_TARGET {
            return Some(Outcome::Winner(0));
        }
        if self.scores[1] >= ROUND_TARGET {
            return Some(Outcome::Winner(1));
        }
        if self.rounds_played() >= ROUND_LIMIT {
            return Some(match self.scores[0].cmp(&self.scores[1]) {
                std::cmp::Ordering::Greater => Outcome::Winner(0),
                std::cmp::Ordering::Less => Outcome::Winner(1),
                std::cmp::Ordering::Equal => Outcome::Draw,
            });
        }
        None
    }
    fn rounds_played(&self) -> u8 {
        self.round - 1
    }
}

impl Default for RockPaperScissors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(state: RockPaperScissors, a: Choice, b: Choice) -> RockPaperScissors {
        state.apply(0, a).unwrap().apply(1, b).unwrap()
    }

    #[test]
    fn rock_beats_scissors_in_round_one() {
        let state = round(RockPaperScissors::new(), Choice::Rock, Choice::Scissors);
        assert_eq!(state.scores(), &[1, 0]);
        assert_eq!(state.last().unwrap().winner, Some(0));
        assert_eq!(state.round(), 2);
    }
    #[test]
    fn three_straight_wins_end_the_match_early() {
        let mut state = RockPaperScissors::new();
        for _ in 0..3 {
            state = round(state, Choice::Paper, Choice::Rock);
        }
        assert_eq!(state.terminal(), Some(Outcome::Winner(0)));
        assert_eq!(state.round(), 4);
    }
    #[test]
    fn tie_consumes_the_round_without_scoring() {
        let state = round(RockPaperScissors::new(), Choice::Rock, Choice::Rock);
        assert_eq!(state.scores(), &[0, 0]);
        assert_eq!(state.round(), 2);
        assert_eq!(state.last().unwrap().winner, None);
        assert_eq!(state.terminal(), None);
    }
    #[test]
    fn all_ties_draw_at_the_round_limit() {
        let mut state = RockPaperScissors::new();
        for _ in 0..5 {
            state = round(state, Choice::Paper, Choice::Paper);
        }
        assert_eq!(state.terminal(), Some(Outcome::Draw));
    }
    #[test]
    fn score_decides_at_the_round_limit() {
        let mut state = RockPaperScissors::new();
        state = round(state, Choice::Rock, Choice::Scissors);
        state = round(state, Choice::Scissors, Choice::Rock);
        state = round(state, Choice::Paper, Choice::Rock);
        state = round(state, Choice::Rock, Choice::Rock);
        state = round(state, Choice::Scissors, Choice::Scissors);
        assert_eq!(state.scores(), &[2, 1]);
        assert_eq!(state.terminal(), Some(Outcome::Winner(0)));
    }
    #[test]
    fn double_submit_is_rejected() {
        let state = RockPaperScissors::new().apply(0, Choice::Rock).unwrap();
        assert_eq!(
            state.apply(0, Choice::Paper),
            Err(RuleViolation::AlreadyChosen)
        );
        assert!(state.has_chosen(0));
        assert!(!state.has_chosen(1));
    }
}

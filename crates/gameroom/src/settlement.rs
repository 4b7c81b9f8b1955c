use super::*;
use duel_core::GameId;

/// Outward settlement interface: the entity the final result is
/// forwarded to. In production this is the token escrow ledger's
/// `declareWinner` path; here it is only the seam.
///
/// Called at most once per session, on the `Completed`/`Abandoned`
/// transition. Delivery failures are an operator concern, surfaced via
/// logging by implementations; the core never retries indefinitely.
#[async_trait::async_trait]
pub trait Settlement: Send + Sync {
    async fn report(&self, game_id: GameId, verdict: &Verdict);
}

/// Logs each result for the operator. Stands in wherever no ledger
/// client is wired up.
pub struct LogSettlement;

#[async_trait::async_trait]
impl Settlement for LogSettlement {
    async fn report(&self, game_id: GameId, verdict: &Verdict) {
        log::info!("[settlement] game {} settled: {}", game_id, verdict);
    }
}

/// Test double recording every report it receives.
#[derive(Default)]
pub struct RecordingSettlement {
    reports: std::sync::Mutex<Vec<(GameId, Verdict)>>,
}

#[async_trait::async_trait]
impl Settlement for RecordingSettlement {
    async fn report(&self, game_id: GameId, verdict: &Verdict) {
        self.reports
            .lock()
            .expect("settlement recorder poisoned")
            .push((game_id, verdict.clone()));
    }
}

impl RecordingSettlement {
    pub fn reports(&self) -> Vec<(GameId, Verdict)> {
        self.reports
            .lock()
            .expect("settlement recorder poisoned")
            .clone()
    }
}

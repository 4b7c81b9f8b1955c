use super::*;
use duel_core::ConnectionId;
use duel_core::GameId;
use duel_core::Wallet;
use duel_gameplay::GameKind;
use duel_gameplay::Outcome;
use duel_gameplay::Play;
use duel_gameplay::RuleViolation;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Connection-event dispatcher.
///
/// Owns the registry: every mutation of session state happens inside
/// this task, one command at a time, which is what serializes
/// concurrent sessions without locks. Side effects per command are
/// strictly bounded: registry mutation, at most one broadcast to the
/// session's two connections, and at most one outward settlement
/// report per session lifetime.
pub struct Coordinator {
    registry: Registry,
    settlement: Arc<dyn Settlement>,
}

impl Coordinator {
    pub fn new(registry: Registry, settlement: Arc<dyn Settlement>) -> Self {
        Self {
            registry,
            settlement,
        }
    }
    /// Drains the inbox until every sender is gone.
    pub async fn run(mut self, mut inbox: UnboundedReceiver<Command>) {
        log::info!("[coordinator] dispatch loop started");
        while let Some(command) = inbox.recv().await {
            self.handle(command).await;
        }
        log::info!("[coordinator] inbox closed, shutting down");
    }
    pub async fn handle(&mut self, command: Command) {
        log::debug!("[coordinator] {}", command);
        match command {
            Command::Join {
                conn,
                tx,
                game_id,
                wallet,
                kind,
            } => self.join(conn, tx, game_id, wallet, kind).await,
            Command::Move {
                conn,
                tx,
                game_id,
                play,
            } => self.play(conn, tx, game_id, play).await,
            Command::Disconnect { conn } => self.disconnect(conn).await,
            Command::Snapshot { reply } => {
                let _ = reply.send(self.registry.snapshot());
            }
            Command::Sweep => self.sweep().await,
        }
    }

    async fn join(
        &mut self,
        conn: ConnectionId,
        tx: UnboundedSender<String>,
        game_id: GameId,
        wallet: Wallet,
        kind: GameKind,
    ) {
        match self.registry.join(game_id, wallet.clone(), kind, conn, tx.clone()) {
            Ok((seat, joined)) => {
                let session = self.registry.get(game_id).expect("just joined");
                session.unicast(seat, &ServerMessage::joined(session, seat));
                match joined {
                    Joined::Created => {
                        log::info!(
                            "[coordinator] {} opened game {} ({})",
                            wallet,
                            game_id,
                            kind.label()
                        );
                    }
                    Joined::Started => {
                        log::info!("[coordinator] game {} started", game_id);
                        session.unicast(seat ^ 1, &ServerMessage::peer_joined(game_id, &wallet));
                        session.broadcast(&ServerMessage::game_start(session));
                    }
                    Joined::Rejoined => {
                        log::info!("[coordinator] {} rejoined game {}", wallet, game_id);
                        session.unicast(seat ^ 1, &ServerMessage::peer_rejoined(game_id, &wallet));
                    }
                }
            }
            Err(e) => {
                log::debug!("[coordinator] join game {} rejected: {}", game_id, e);
                let _ = tx.send(ServerMessage::error(e).to_json());
            }
        }
    }

    async fn play(
        &mut self,
        conn: ConnectionId,
        tx: UnboundedSender<String>,
        game_id: GameId,
        play: Play,
    ) {
        let session = match self.registry.get(game_id) {
            Ok(session) => session,
            Err(e) => {
                let _ = tx.send(ServerMessage::error(e).to_json());
                return;
            }
        };
        let seat = match session.seat_of_conn(conn) {
            Some(seat) => seat,
            None => {
                let _ = tx.send(ServerMessage::error(SessionError::NotParticipant).to_json());
                return;
            }
        };
        if session.status() == SessionStatus::Forming {
            session.unicast(
                seat,
                &ServerMessage::move_rejected(game_id, "the game has not started"),
            );
            return;
        }
        if session.status().is_terminal() {
            session.unicast(
                seat,
                &ServerMessage::move_rejected(game_id, RuleViolation::Terminal),
            );
            return;
        }
        match session.state().apply(seat, &play) {
            Err(violation) => {
                log::debug!(
                    "[coordinator] game {} seat {} rejected: {}",
                    game_id,
                    seat,
                    violation
                );
                session.unicast(seat, &ServerMessage::move_rejected(game_id, violation));
            }
            Ok(next) => {
                let outcome = next.terminal();
                let session = self.registry.get_mut(game_id).expect("still registered");
                session.set_state(next);
                session.broadcast(&ServerMessage::game_move(session));
                if let Some(outcome) = outcome {
                    let verdict = match outcome {
                        Outcome::Winner(winner) => Verdict::Winner(
                            session.wallet(winner).cloned().expect("winner is seated"),
                        ),
                        Outcome::Draw => Verdict::Draw,
                    };
                    log::info!("[coordinator] game {} reached its end: {}", game_id, outcome);
                    self.finish(game_id, verdict).await;
                }
            }
        }
    }

    async fn disconnect(&mut self, conn: ConnectionId) {
        let Some((game_id, seat)) = self.registry.release(conn) else {
            return;
        };
        let session = match self.registry.get(game_id) {
            Ok(session) => session,
            Err(_) => return,
        };
        match session.status() {
            SessionStatus::Forming => {
                // Never reached Active and nobody is left listening.
                if session.connected() == 0 {
                    log::info!("[coordinator] game {} dissolved before starting", game_id);
                    self.registry.evict(game_id);
                }
            }
            SessionStatus::Active => {
                if self.registry.abandon(game_id).unwrap_or(false) {
                    log::info!("[coordinator] game {} abandoned: seat {} left", game_id, seat);
                    let session = self.registry.get(game_id).expect("still registered");
                    session.unicast(seat ^ 1, &ServerMessage::opponent_left(game_id));
                    self.settlement.report(game_id, &Verdict::Void).await;
                }
            }
            _ => {}
        }
    }

    async fn sweep(&mut self) {
        let report = self.registry.sweep();
        for game_id in report.expired {
            if let Ok(session) = self.registry.get(game_id) {
                session.broadcast(&ServerMessage::session_ended(game_id, &Verdict::Void));
            }
            self.settlement.report(game_id, &Verdict::Void).await;
        }
    }

    /// Records the verdict and, on the first (and only) transition,
    /// tells both seats and the settlement collaborator.
    async fn finish(&mut self, game_id: GameId, verdict: Verdict) {
        match self.registry.complete(game_id, verdict.clone()) {
            Ok(true) => {
                if let Ok(session) = self.registry.get(game_id) {
                    session.broadcast(&ServerMessage::session_ended(game_id, &verdict));
                }
                self.settlement.report(game_id, &verdict).await;
            }
            Ok(false) => {}
            Err(e) => log::warn!("[coordinator] completing game {} rejected: {}", game_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_gameplay::Choice;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    struct Rig {
        coordinator: Coordinator,
        clock: Arc<ManualClock>,
        settlement: Arc<RecordingSettlement>,
    }

    fn rig() -> Rig {
        let clock = Arc::new(ManualClock::new());
        let settlement = Arc::new(RecordingSettlement::default());
        let registry = Registry::new(clock.clone(), LifecycleConfig::default());
        Rig {
            coordinator: Coordinator::new(registry, settlement.clone()),
            clock,
            settlement,
        }
    }

    struct Client {
        conn: ConnectionId,
        tx: UnboundedSender<String>,
        rx: UnboundedReceiver<String>,
        wallet: Wallet,
    }

    fn client(wallet: &str) -> Client {
        let (tx, rx) = unbounded_channel();
        Client {
            conn: ConnectionId::new(),
            tx,
            rx,
            wallet: Wallet::new(wallet),
        }
    }

    impl Client {
        /// Everything received so far, parsed.
        fn drain(&mut self) -> Vec<serde_json::Value> {
            let mut frames = Vec::new();
            while let Ok(json) = self.rx.try_recv() {
                frames.push(serde_json::from_str(&json).expect("server frames are json"));
            }
            frames
        }
        fn kinds(&mut self) -> Vec<String> {
            self.drain()
                .iter()
                .map(|f| f["type"].as_str().expect("tagged frame").to_string())
                .collect()
        }
    }

    async fn join(rig: &mut Rig, client: &Client, game_id: GameId, kind: GameKind) {
        rig.coordinator
            .handle(Command::Join {
                conn: client.conn,
                tx: client.tx.clone(),
                game_id,
                wallet: client.wallet.clone(),
                kind,
            })
            .await;
    }
    async fn play(rig: &mut Rig, client: &Client, game_id: GameId, play: Play) {
        rig.coordinator
            .handle(Command::Move {
                conn: client.conn,
                tx: client.tx.clone(),
                game_id,
                play,
            })
            .await;
    }

    #[tokio::test]
    async fn tic_tac_toe_match_settles_exactly_once() {
        let mut rig = rig();
        let mut a = client("0xaaaa");
        let mut b = client("0xbbbb");
        join(&mut rig, &a, 1, GameKind::TicTacToe).await;
        join(&mut rig, &b, 1, GameKind::TicTacToe).await;
        assert!(a.kinds().contains(&"game_start".to_string()));
        assert!(b.kinds().contains(&"game_start".to_string()));
        for (who, cell) in [(&a, 4), (&b, 0), (&a, 3), (&b, 6), (&a, 5)] {
            play(&mut rig, who, 1, Play::Mark { cell }).await;
        }
        let finals = a.kinds();
        assert_eq!(finals.iter().filter(|k| *k == "session_ended").count(), 1);
        assert!(b.kinds().contains(&"session_ended".to_string()));
        assert_eq!(
            rig.settlement.reports(),
            vec![(1, Verdict::Winner(Wallet::new("0xaaaa")))]
        );
        // the session is over; further moves are rejected locally
        play(&mut rig, &b, 1, Play::Mark { cell: 8 }).await;
        assert_eq!(b.kinds(), vec!["move_rejected"]);
        assert_eq!(rig.settlement.reports().len(), 1);
    }

    #[tokio::test]
    async fn rejections_reach_only_the_offender() {
        let mut rig = rig();
        let mut a = client("0xaaaa");
        let mut b = client("0xbbbb");
        join(&mut rig, &a, 1, GameKind::TicTacToe).await;
        join(&mut rig, &b, 1, GameKind::TicTacToe).await;
        a.drain();
        b.drain();
        play(&mut rig, &b, 1, Play::Mark { cell: 0 }).await;
        assert_eq!(b.kinds(), vec!["move_rejected"]);
        assert!(a.drain().is_empty());
    }

    #[tokio::test]
    async fn third_participant_is_turned_away() {
        let mut rig = rig();
        let mut a = client("0xaaaa");
        let mut b = client("0xbbbb");
        let mut c = client("0xcccc");
        join(&mut rig, &a, 1, GameKind::RockPaperScissors).await;
        join(&mut rig, &b, 1, GameKind::RockPaperScissors).await;
        a.drain();
        b.drain();
        join(&mut rig, &c, 1, GameKind::RockPaperScissors).await;
        assert_eq!(c.kinds(), vec!["error"]);
        assert!(a.drain().is_empty());
        assert!(b.drain().is_empty());
    }

    #[tokio::test]
    async fn disconnect_abandons_and_voids_once() {
        let mut rig = rig();
        let mut a = client("0xaaaa");
        let b = client("0xbbbb");
        join(&mut rig, &a, 1, GameKind::RockPaperScissors).await;
        join(&mut rig, &b, 1, GameKind::RockPaperScissors).await;
        a.drain();
        rig.coordinator.handle(Command::Disconnect { conn: b.conn }).await;
        assert_eq!(a.kinds(), vec!["opponent_left"]);
        assert_eq!(rig.settlement.reports(), vec![(1, Verdict::Void)]);
        // a repeated disconnect must be a no-op
        rig.coordinator.handle(Command::Disconnect { conn: b.conn }).await;
        assert!(a.drain().is_empty());
        assert_eq!(rig.settlement.reports().len(), 1);
    }

    #[tokio::test]
    async fn rejoining_restores_seat_and_state() {
        let mut rig = rig();
        let mut a = client("0xaaaa");
        let mut b = client("0xbbbb");
        join(&mut rig, &a, 1, GameKind::TicTacToe).await;
        join(&mut rig, &b, 1, GameKind::TicTacToe).await;
        play(&mut rig, &a, 1, Play::Mark { cell: 4 }).await;
        play(&mut rig, &b, 1, Play::Mark { cell: 0 }).await;
        rig.coordinator.handle(Command::Disconnect { conn: b.conn }).await;
        let mut back = client("0xbbbb");
        join(&mut rig, &back, 1, GameKind::TicTacToe).await;
        let frames = back.drain();
        let joined = frames
            .iter()
            .find(|f| f["type"] == "joined")
            .expect("rejoin acknowledged");
        assert_eq!(joined["seat"], 1);
        assert_eq!(joined["state"]["board"][4], "x");
        assert_eq!(joined["state"]["board"][0], "o");
        // no second settlement for the same session
        assert_eq!(rig.settlement.reports(), vec![(1, Verdict::Void)]);
    }

    #[tokio::test]
    async fn forming_sessions_expire_into_void() {
        let mut rig = rig();
        let mut a = client("0xaaaa");
        join(&mut rig, &a, 1, GameKind::NumberGuessing).await;
        a.drain();
        rig.clock.advance(Duration::from_secs(121));
        rig.coordinator.handle(Command::Sweep).await;
        assert_eq!(a.kinds(), vec!["session_ended"]);
        assert_eq!(rig.settlement.reports(), vec![(1, Verdict::Void)]);
    }

    #[tokio::test]
    async fn evicted_sessions_are_gone() {
        let mut rig = rig();
        let a = client("0xaaaa");
        let mut b = client("0xbbbb");
        join(&mut rig, &a, 1, GameKind::NumberGuessing).await;
        join(&mut rig, &b, 1, GameKind::NumberGuessing).await;
        play(&mut rig, &a, 1, Play::Target { value: 50 }).await;
        play(&mut rig, &b, 1, Play::Guess { value: 50 }).await;
        assert_eq!(
            rig.settlement.reports(),
            vec![(1, Verdict::Winner(Wallet::new("0xbbbb")))]
        );
        rig.clock.advance(Duration::from_secs(61));
        rig.coordinator.handle(Command::Sweep).await;
        b.drain();
        play(&mut rig, &b, 1, Play::Guess { value: 10 }).await;
        assert_eq!(b.kinds(), vec!["error"]);
    }

    #[tokio::test]
    async fn rps_round_resolution_reaches_both_seats() {
        let mut rig = rig();
        let mut a = client("0xaaaa");
        let mut b = client("0xbbbb");
        join(&mut rig, &a, 1, GameKind::RockPaperScissors).await;
        join(&mut rig, &b, 1, GameKind::RockPaperScissors).await;
        a.drain();
        b.drain();
        play(&mut rig, &a, 1, Play::Throw { choice: Choice::Rock }).await;
        // opponent sees only that a choice is in, not which
        let frames = b.drain();
        assert_eq!(frames[0]["type"], "game_move");
        assert_eq!(frames[0]["state"]["chosen"][0], true);
        play(&mut rig, &b, 1, Play::Throw { choice: Choice::Scissors }).await;
        let frames = b.drain();
        let round = &frames[0]["state"]["last_round"];
        assert_eq!(round["winner"], 0);
        assert_eq!(frames[0]["state"]["scores"][0], 1);
        assert!(!a.drain().is_empty());
    }

    #[tokio::test]
    async fn snapshot_lists_live_sessions() {
        let mut rig = rig();
        let a = client("0xaaaa");
        join(&mut rig, &a, 42, GameKind::TicTacToe).await;
        let (reply, rx) = tokio::sync::oneshot::channel();
        rig.coordinator.handle(Command::Snapshot { reply }).await;
        let summaries = rx.await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, 42);
        assert_eq!(summaries[0].participants, 1);
        assert_eq!(summaries[0].status, SessionStatus::Forming);
    }
}

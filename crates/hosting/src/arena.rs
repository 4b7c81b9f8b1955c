use duel_core::ConnectionId;
use duel_core::SWEEP_INTERVAL;
use duel_gameroom::ClientMessage;
use duel_gameroom::Command;
use duel_gameroom::Coordinator;
use duel_gameroom::LifecycleConfig;
use duel_gameroom::Protocol;
use duel_gameroom::Registry;
use duel_gameroom::ServerMessage;
use duel_gameroom::Settlement;
use duel_gameroom::SessionSummary;
use duel_gameroom::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Front door for live sessions.
///
/// Owns the coordinator inbox. Every WebSocket connection is bridged
/// into it with a fresh [`ConnectionId`]; the bridge never interprets
/// game semantics, it only relays frames.
pub struct Arena {
    inbox: UnboundedSender<Command>,
}

impl Arena {
    /// Spawns the coordinator dispatch task and the periodic sweeper.
    pub fn spawn(config: LifecycleConfig, settlement: Arc<dyn Settlement>) -> Self {
        let (inbox, commands) = unbounded_channel();
        let registry = Registry::new(Arc::new(SystemClock), config);
        tokio::spawn(Coordinator::new(registry, settlement).run(commands));
        let sweeper = inbox.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL));
            loop {
                tick.tick().await;
                if sweeper.send(Command::Sweep).is_err() {
                    break;
                }
            }
        });
        Self { inbox }
    }

    /// Read-only session listing for the status surface.
    pub async fn snapshot(&self) -> anyhow::Result<Vec<SessionSummary>> {
        let (reply, rx) = oneshot::channel();
        self.inbox
            .send(Command::Snapshot { reply })
            .map_err(|_| anyhow::anyhow!("coordinator is gone"))?;
        rx.await.map_err(|_| anyhow::anyhow!("coordinator dropped the request"))
    }

    /// Relays one WebSocket connection into the dispatch loop.
    /// The `Disconnect` command is injected exactly once, however the
    /// socket goes away.
    pub fn bridge(&self, mut session: actix_ws::Session, mut stream: actix_ws::MessageStream) {
        use futures::StreamExt;
        let conn = ConnectionId::new();
        let inbox = self.inbox.clone();
        let (tx, mut rx) = unbounded_channel::<String>();
        log::debug!("[bridge {}] connected", conn);
        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(json) => if session.text(json).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = stream.next() => match msg {
                        Some(Ok(actix_ws::Message::Text(text))) => match Protocol::decode(&text) {
                            Ok(ClientMessage::JoinGame { game_id, wallet, game_type }) => {
                                let join = Command::Join { conn, tx: tx.clone(), game_id, wallet, kind: game_type };
                                if inbox.send(join).is_err() { break 'sesh }
                            }
                            Ok(ClientMessage::GameMove { game_id, play }) => {
                                let mv = Command::Move { conn, tx: tx.clone(), game_id, play };
                                if inbox.send(mv).is_err() { break 'sesh }
                            }
                            Err(e) => {
                                log::debug!("[bridge {}] {}", conn, e);
                                if session.text(ServerMessage::error(e).to_json()).await.is_err() { break 'sesh }
                            }
                        },
                        Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            let _ = inbox.send(Command::Disconnect { conn });
            log::debug!("[bridge {}] disconnected", conn);
        });
    }
}

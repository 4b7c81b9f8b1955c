//! Backend serving live duel sessions over WebSocket.
//!
//! Composition root: wires the [`Arena`](duel_hosting::Arena) into an
//! actix-web server with the status surface and the WebSocket route.

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use duel_gameroom::LifecycleConfig;
use duel_gameroom::LogSettlement;
use duel_hosting::Arena;
use duel_hosting::handlers;
use std::sync::Arc;
use std::time::Duration;

/// Runtime options for the server binary.
#[derive(Debug, clap::Parser)]
pub struct Opts {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3001")]
    pub bind: String,
    /// Seconds a finished session stays visible before eviction.
    #[arg(long, default_value_t = duel_core::GRACE_PERIOD)]
    pub grace: u64,
    /// Seconds a session may wait for its second participant.
    #[arg(long, default_value_t = duel_core::JOIN_TIMEOUT)]
    pub join_timeout: u64,
}

impl From<&Opts> for LifecycleConfig {
    fn from(opts: &Opts) -> Self {
        Self {
            grace: Duration::from_secs(opts.grace),
            join_timeout: Duration::from_secs(opts.join_timeout),
        }
    }
}

pub async fn run(opts: Opts) -> Result<(), std::io::Error> {
    let arena = web::Data::new(Arena::spawn(
        LifecycleConfig::from(&opts),
        Arc::new(LogSettlement),
    ));
    log::info!("starting duel server on {}", opts.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(arena.clone())
            .route("/", web::get().to(handlers::index))
            .route("/games", web::get().to(handlers::games))
            .route("/play", web::get().to(handlers::play))
    })
    .bind(&opts.bind)?
    .run()
    .await
}

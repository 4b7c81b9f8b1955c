use clap::Parser;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    duel_core::log();
    let opts = duel_server::Opts::parse();
    duel_server::run(opts).await
}

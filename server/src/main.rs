use clap::Parser;
use log::info;
use server::config::ServerConfig;
use server::network::Server;

/// Main-method of the application.
/// Parses command-line arguments, binds the listener, then runs the accept
/// loop and the simulation loop until interrupted.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Server IP address to bind to
        #[clap(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Server port to listen on
        #[clap(short, long, default_value = "11000")]
        port: u16,
        /// Milliseconds per simulation frame
        #[clap(short, long, default_value = "16")]
        tick_ms: u64,
        /// Width and height of the square world
        #[clap(short, long, default_value = "750")]
        world_size: i32,
        /// Number of stars created at startup
        #[clap(short, long, default_value = "1")]
        stars: i32,
        /// Enable the travelling-star ruleset
        #[clap(short, long)]
        enhanced: bool,
        /// Seed for spawn randomness
        #[clap(long, default_value = "1996")]
        seed: u64,
    }

    env_logger::init();
    let args = Args::parse();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        ms_per_frame: args.tick_ms,
        world_size: args.world_size,
        starting_star_amount: args.stars,
        enhanced: args.enhanced,
        rng_seed: args.seed,
        ..ServerConfig::default()
    };

    let server = Server::bind(config).await?;

    tokio::select! {
        _ = server.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

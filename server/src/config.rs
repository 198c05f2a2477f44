/// Simulation and transport tunables, populated in full before the server
/// starts. The settings source (file or command line) fills one of these;
/// the simulation never sees a partially-loaded configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the TCP listener to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Width and height of the square world.
    pub world_size: i32,
    /// Target milliseconds per simulation frame.
    pub ms_per_frame: u64,
    /// Hit points a ship (re)spawns with.
    pub starting_hp: i32,
    /// Acceleration the ship's engines apply per frame of thrust.
    pub engine_strength: f64,
    /// Degrees a ship turns per frame holding a turn control.
    pub turn_rate: f64,
    /// Distance a projectile travels per frame.
    pub projectile_speed: f64,
    /// Frames a ship must wait between shots.
    pub firing_delay: i32,
    /// Frames a destroyed ship waits before respawning.
    pub respawn_delay: i32,
    /// Collision radius of every star.
    pub star_radius: f64,
    /// Gravitational pull of a star on ships.
    pub star_mass: f64,
    /// Per-frame acceleration of a travelling star (enhanced mode).
    pub star_accel: f64,
    /// Number of stars created at startup.
    pub starting_star_amount: i32,
    /// Enables the travelling-star ruleset; otherwise stars hold the origin.
    pub enhanced: bool,
    /// Frame threshold a dead star must reach before it revives.
    pub star_delay: f64,
    /// Frames between evaluations of the procedural star-spawn roll.
    pub star_counter_end: i32,
    /// Base rate at which a dead star's revival counter advances.
    pub base_freq: f64,
    /// Seed for spawn-position and star-travel randomness.
    pub rng_seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 11000,
            world_size: 750,
            ms_per_frame: 16,
            starting_hp: 5,
            engine_strength: 0.08,
            turn_rate: 3.0,
            projectile_speed: 14.0,
            firing_delay: 6,
            respawn_delay: 300,
            star_radius: 30.0,
            star_mass: 0.002,
            star_accel: 0.02,
            starting_star_amount: 1,
            enhanced: false,
            star_delay: 125.0,
            star_counter_end: 500,
            base_freq: 10.0,
            rng_seed: 1996,
        }
    }
}

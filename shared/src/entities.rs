use crate::vector::Vec2D;
use serde::{Deserialize, Serialize};

/// Collision radius of every ship.
pub const SHIP_RADIUS: f64 = 30.0;

/// Radius a projectile presents to stars and the world border. Against
/// ships a projectile is a point (radius 0).
pub const PROJECTILE_CONTACT_RADIUS: f64 = 10.0;

/// A player-controlled ship.
///
/// The serialized form carries only the fields clients need each frame; the
/// remaining fields are server-side bookkeeping. `death_counter` and
/// `initial_hp` are networked because clients use them to time the explosion
/// animation and scale the health bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Unique ship identifier, doubling as the record discriminant on the wire.
    #[serde(rename = "ship")]
    pub id: i32,
    /// Current position.
    pub loc: Vec2D,
    /// Heading as a unit vector.
    pub dir: Vec2D,
    /// Whether the engines fired this frame, so clients can draw exhaust.
    pub thrust: bool,
    /// The player's display name.
    pub name: String,
    /// Hit points. 0 means temporarily destroyed and waiting to respawn.
    pub hp: i32,
    /// The ship's score. Never decreases.
    pub score: i32,
    /// Frames elapsed since hp reached 0, gating respawn.
    #[serde(rename = "deathCounter")]
    pub death_counter: i32,
    /// Hp at the most recent (re)spawn.
    #[serde(rename = "initialHp")]
    pub initial_hp: i32,
    /// Current velocity. Always zero when first created.
    #[serde(skip)]
    pub velocity: Vec2D,
    /// Pending control string, cleared every tick after it is applied.
    #[serde(skip)]
    pub command: String,
    /// Frame counter for the firing delay.
    #[serde(skip)]
    pub frame_delay: i32,
    /// Whether this ship has completed its first spawn.
    #[serde(skip)]
    pub spawned: bool,
}

impl Ship {
    /// Creates a ship fresh off the handshake. Position, heading and hp are
    /// filled in by the world's spawn logic before the ship enters play.
    pub fn new(id: i32, name: String, initial_hp: i32) -> Self {
        Ship {
            id,
            loc: Vec2D::default(),
            dir: Vec2D::default(),
            thrust: false,
            name,
            hp: 0,
            score: 0,
            death_counter: 1,
            initial_hp,
            velocity: Vec2D::default(),
            command: String::new(),
            frame_delay: 1,
            spawned: false,
        }
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Unique projectile identifier, doubling as the record discriminant.
    #[serde(rename = "proj")]
    pub id: i32,
    /// Current position.
    pub loc: Vec2D,
    /// Travel direction as a unit vector.
    pub dir: Vec2D,
    /// Cleared the tick before the projectile is removed from the world.
    pub alive: bool,
    /// Id of the ship that fired this projectile.
    pub owner: i32,
    /// Distance travelled per tick.
    #[serde(skip)]
    pub speed: f64,
    /// Set the tick the projectile strikes a ship; removal follows next pass.
    #[serde(skip)]
    pub made_contact: bool,
}

impl Projectile {
    pub fn new(id: i32, loc: Vec2D, dir: Vec2D, owner: i32, speed: f64) -> Self {
        Projectile {
            id,
            loc,
            dir,
            alive: true,
            owner,
            speed,
            made_contact: false,
        }
    }
}

/// A gravity well.
///
/// Only id, position and mass are networked; travel state is server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    /// Unique star identifier, doubling as the record discriminant.
    #[serde(rename = "star")]
    pub id: i32,
    /// Current position.
    pub loc: Vec2D,
    /// Controls the gravitational pull this star exerts on ships.
    pub mass: f64,
    /// Acceleration magnitude while travelling (enhanced mode).
    #[serde(skip)]
    pub accel: f64,
    /// Current velocity (enhanced mode).
    #[serde(skip)]
    pub velocity: Vec2D,
    /// Travel heading (enhanced mode).
    #[serde(skip)]
    pub dir: Vec2D,
    /// A recycled star waits dead until its frame counter expires.
    #[serde(skip)]
    pub alive: bool,
    /// Frame counter gating respawn; also marks a just-revived star at 0.
    #[serde(skip)]
    pub star_frame: f64,
}

impl Star {
    pub fn new(id: i32, loc: Vec2D, mass: f64, accel: f64) -> Self {
        Star {
            id,
            loc,
            mass,
            accel,
            velocity: Vec2D::default(),
            dir: Vec2D::default(),
            alive: false,
            star_frame: 0.0,
        }
    }
}

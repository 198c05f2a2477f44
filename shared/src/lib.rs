//! Types shared between the SpaceWars server and its clients: 2D vector
//! math, the entity records with their wire serialization, and the control
//! string protocol. The server owns all simulation logic; clients only
//! mirror these records to draw the world.

pub mod entities;
pub mod protocol;
pub mod vector;

pub use entities::{Projectile, Ship, Star, PROJECTILE_CONTACT_RADIUS, SHIP_RADIUS};
pub use protocol::{decode_record, ControlInput, WireRecord, DELIMITER};
pub use vector::Vec2D;

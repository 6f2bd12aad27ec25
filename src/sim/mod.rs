//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no clocks
//! - Stable iteration order (active list order)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod collision;
pub mod entity;
pub mod input;
pub mod layout;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{BrickFace, EdgeContacts, bounce_off_brick, edge_contacts, struck_face};
pub use entity::{Ball, Body, Brick, Entity, EntityId, Motion, Paddle};
pub use input::{Direction, HeldDirections};
pub use layout::generate_bricks;
pub use shape::{Aabb, CircleDimensions, Dimensions, RectangleDimensions, Shape};
pub use state::World;
pub use tick::{CollisionEvent, resolve_collisions, step};

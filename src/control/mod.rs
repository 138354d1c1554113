//! Motion control: the distance-based auto-follow policy.

pub mod follow;

pub use crate::drivers::motors::Motion;
pub use follow::{decide, BuzzerCommand, FollowBands, FollowDecision};

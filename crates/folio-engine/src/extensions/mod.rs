// extensions/mod.rs
//
// Motion helpers shared by the view models.

pub mod easing;

pub use easing::{ease, lerp, there_and_back, Easing};

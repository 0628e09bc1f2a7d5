pub mod ambient;
pub mod contact;
pub mod dialogue;
pub mod entrance;
pub mod sections;
pub mod sparks;
pub mod trail;

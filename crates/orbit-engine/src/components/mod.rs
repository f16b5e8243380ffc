pub mod entity;
pub mod sprite;

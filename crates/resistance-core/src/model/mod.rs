pub mod player;
pub mod rules;

pub mod core;

pub mod entertainment;

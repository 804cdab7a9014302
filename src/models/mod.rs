pub mod arrival;
pub mod cargo;

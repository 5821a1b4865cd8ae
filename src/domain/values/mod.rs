pub mod distance;
pub mod dosha;

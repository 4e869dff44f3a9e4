pub mod animator;
pub mod ease;
pub mod pointset;
pub mod trigger;

pub mod assign;
pub mod ramp;

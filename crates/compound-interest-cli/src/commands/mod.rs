pub mod normalize;
pub mod solve;

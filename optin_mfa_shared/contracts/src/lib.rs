pub mod hash;
pub mod scratch;

pub mod hash;
pub mod install;
pub mod plan;

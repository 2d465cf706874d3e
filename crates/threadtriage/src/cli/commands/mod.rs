pub mod assemble;
pub mod classify;

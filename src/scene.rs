pub mod assemble;
pub mod hover;
pub mod label;
pub mod layer;

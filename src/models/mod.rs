pub mod extract;
pub mod root;

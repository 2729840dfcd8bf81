pub mod extract;
pub mod root;
pub mod normalize;
pub mod ytdlp;
pub use extract::ExtractController;
pub use root::RootController;

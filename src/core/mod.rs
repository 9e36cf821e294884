pub mod compare;
pub mod dhash;
pub mod driver;
pub mod grayscale;
pub mod loader;
pub mod normalize;
pub mod scanner;
pub mod thumbnail;

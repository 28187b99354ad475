pub mod images;
pub mod sets;

pub use sets::Dataset;

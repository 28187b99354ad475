pub mod store;
pub mod tensor;

pub use tensor::WeightTensor;

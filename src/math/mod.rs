pub mod functions;
pub mod matrix;

pub use functions::{cost, sigmoid, sigmoid_derivative};
pub use matrix::Matrix;

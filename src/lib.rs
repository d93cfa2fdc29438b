pub mod data;
pub mod error;
pub mod layers;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use data::csv::Dataset;
pub use error::{DataError, NnError, TrainError};
pub use layers::dense::Layer;
pub use math::functions::{cost, sigmoid};
pub use math::matrix::Matrix;
pub use network::network::Network;
pub use train::loop_fn::train_loop;
pub use train::train_config::TrainConfig;

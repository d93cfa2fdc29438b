pub mod csv;
pub mod encoding;

pub use csv::{parse_csv, read_csv, Dataset};
pub use encoding::{argmax, one_hot};

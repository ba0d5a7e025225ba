pub mod sparse_hash;

pub use sparse_hash::{horizontal_distance, SparseHashGrid};

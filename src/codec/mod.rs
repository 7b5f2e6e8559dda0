//! Binary codecs for values bound as request parameters.

pub mod date_range;

pub use date_range::{decode_date_range, encode_date_range};

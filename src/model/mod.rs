//! # Graph Value Model
//!
//! Plain value types that feed the writer and the date-range codec.
//!
//! Design rule: pure data. No I/O, no state, no async.

pub mod consistency;
pub mod date_range;
pub mod geometry;

pub use consistency::Consistency;
pub use date_range::{DateRange, DateRangeBound, DateRangePrecision};
pub use geometry::{LineString, Point, Polygon};

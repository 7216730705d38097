//! Date ranges that remember the precision they were written at.

pub mod layout;
pub mod range;

pub use layout::DateLayout;
pub use range::{DateError, DateRange, EndpointError, Moment};

//! Progressive Overload Tracker's view library.
//!
//! The library describes pages as a tree of elements ([`layout`]), renders
//! that tree into an HTML document ([`render`]) and maps request paths to the
//! pages that should be mounted for them ([`router`]).
//!
//! **WARNING**: This library is internal to the tracker and there are no plans
//! to stabilize it. The API may break at any time without notice.

#![warn(missing_docs)]

pub mod layout;
pub mod render;
pub mod router;
pub mod welcome;

//! Request routing.
//!
//! Routes are compiled once into an in-memory table and matched per
//! request in declaration order: the first entry whose method set and
//! segment pattern both fit wins. Patterns support literal segments,
//! `:name` captures and a trailing `...` glob; whole tables can be
//! mounted under a path prefix.

pub mod pattern;
pub mod table;

pub use pattern::{Params, Pattern, RouteCompileError, SegmentMatcher, split_segments};
pub use table::{Action, Matched, MethodSet, RouteHandlerFn, Router};

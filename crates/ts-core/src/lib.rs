//! ts-core: task ids, the retry policy and the `/suggestTask` wire types.
//!
//! `task` holds the built-in task labels and the `NoTaskFound` sentinel,
//! `policy` the attempt cap for the upstream call, `api` the request,
//! response and error bodies.

pub mod api;
pub mod policy;
pub mod task;

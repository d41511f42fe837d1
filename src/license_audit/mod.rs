/// Domain layer of the license audit: package graph, license corpus and
/// matching, with no I/O of its own.
pub mod corpus;
pub mod domain;
pub mod services;

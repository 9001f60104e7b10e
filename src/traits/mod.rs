//! Core trait abstractions - the seams where collaborators plug in.

pub mod model;

pub use model::ChatModel;

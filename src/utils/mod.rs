//! Utility modules shared by the post scanner and the generator.

pub mod date;
pub mod path;
pub mod plural;
pub mod slug;

//! Individual entity generators.
//!
//! Every generator takes the RNG explicitly; none of them keep hidden random
//! state, so a seeded RNG fully determines their output.

pub mod product;
pub mod profile;
pub mod purchase;
pub mod timestamp;

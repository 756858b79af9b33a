//! Image encoding: the card's raw frame becomes a portable PNG payload.

pub mod png;

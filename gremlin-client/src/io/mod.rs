//! The GraphSON codec component: Groovy literal rendering for
//! outbound traversal arguments (`groovy`) and typed-JSON decoding of
//! inbound results (`graphson`).

pub mod graphson;
pub mod groovy;

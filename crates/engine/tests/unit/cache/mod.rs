//! Cache engine tests.


/// Property tests over random traces.
pub mod invariants;

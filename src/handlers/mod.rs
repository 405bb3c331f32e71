// handlers/mod.rs - Handler tiers
//
// Public (no credential) -> Protected (any signed-in user, plus the mentor and
// mentee areas) -> Elevated (administrators). Tiers describe who a handler
// serves; enforcement happens in the access gate before any handler runs.

pub mod elevated;
pub mod protected;
pub mod public;

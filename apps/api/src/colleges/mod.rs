// College lookup: pass-through to the external college directory with
// district allow-listing and program-name filtering.

pub mod client;
pub mod filter;
pub mod handlers;

// Handler module entry point
// Request dispatch plus the page handler it routes to

pub mod home;
pub mod router;

pub use router::handle_request;

// End-to-end tests for the storefront client
//
// Each test starts its own in-process axum backend on an ephemeral port and
// drives the real reqwest transport against it, with tokens persisted to a
// temporary file. Tests are isolated and run in parallel.

mod test_auth;
mod test_fetch;

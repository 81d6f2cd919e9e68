// system-tests/src/lib.rs
// ============================================================================
// Module: Verdant System Tests Crate
// Description: Placeholder library target for the system test suites.
// Purpose: Host end-to-end pipeline suites under tests/.
// Dependencies: none
// ============================================================================

//! ## Overview
//! This crate exists to host the end-to-end suites under `tests/`; the
//! library target itself is intentionally empty.

//! Exit codes for `ipgate`.
//! `check` exits by what happened to the element, so scripts can branch on it.

pub const EXIT_SUCCESS: i32 = 0; // Element visible (allowed, missing, or failed open)
pub const EXIT_INTERNAL_ERROR: i32 = 2; // Setup failed (client or config)
pub const EXIT_HIDDEN: i32 = 3; // Element hidden (blocked)

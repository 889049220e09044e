//! Well-known keys in the persistent state store.
//!
//! Each key has exactly one writer: the token keeper owns `AUTH_TOKEN` and
//! `LOGGED_USER`, the cache synchronizer owns `SHOPPING_LISTS`. Logout is
//! the one cross-cutting path allowed to remove all three.

/// Whole login payload as JSON (`{"xtoken": "..."}`).
pub const AUTH_TOKEN: &str = "auth_token";

/// Last successfully fetched list snapshot, a JSON array.
pub const SHOPPING_LISTS: &str = "shopping_lists";

/// Profile of the logged-in user as JSON.
pub const LOGGED_USER: &str = "logged_user";

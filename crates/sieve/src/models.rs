//! These models represent the conversation objects the chat backend hands to the display layer
//!
//! Messages arrive in the UI message format of the chat transport: a role, an id and an ordered
//! list of typed parts. Parts are decoded into a closed set of [`fragment::Fragment`] variants
//! so the sanitizer can match on them; anything we don't model is carried verbatim so it can be
//! passed back out unchanged.
pub mod fragment;
pub mod message;
pub mod role;

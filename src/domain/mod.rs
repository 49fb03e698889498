//! Domain layer - Pure types, no I/O.

// Identifier scheme (catalog ids, local:, dlna://, legacy ids)
pub mod identifier;

// Persisted records and playback views
pub mod records;

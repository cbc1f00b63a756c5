//! Transfer form limits

/// Longest memo accepted, in UTF-8 bytes
pub const MAX_MEMO_BYTES: usize = 256;

/// Default account index within a vault
pub const DEFAULT_ACCOUNT: u32 = 0;

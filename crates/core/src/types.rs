/// Ledger keys for assets are the asset ids themselves.
pub type AssetId = String;

/// Opaque identifier of an authenticated caller, as issued by the host's PKI.
pub type ClientId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Shared constants for catalog access and time-scale conversion.

// Open Supernova Catalog JSON exports, one document per transient
pub const CATALOG_BASE_URL: &str =
    "https://sne.space/astrocats/astrocats/supernovae/output/json/";

// Names processed per batch run unless overridden
pub const DEFAULT_FETCH_LIMIT: usize = 20;

// Julian Date minus Modified Julian Date
pub const JD_MJD_OFFSET: f64 = 2_400_000.5;

// MJD of the Unix epoch, 1970-01-01 00:00 UTC
pub const UNIX_EPOCH_MJD: f64 = 40_587.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

// Days from 0001-01-01 (chrono's day 1 of the common era) to the
// MJD epoch, 1858-11-17 00:00 UTC
pub const MJD_EPOCH_DAYS_CE: i32 = 678_576;

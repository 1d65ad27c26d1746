mod errors;
mod normalize;
mod preferences;
mod raw;
mod transaction;

pub use errors::RecordError;
pub use normalize::normalize_all;
pub use preferences::Preferences;
pub use raw::{RawKey, RawRecord};
pub use transaction::Transaction;

mod errors;
mod status;

pub use status::Status;

/// Currency that needs no conversion for display and is targeted by the `rub_only` preference.
pub const LOCAL_CURRENCY: &str = "RUB";

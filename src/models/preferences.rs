use crate::types::LOCAL_CURRENCY;

/// User choices that drive the optional pipeline stages.
///
/// Every field defaults to the value that disables its stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub sort_date: bool,
    pub sort_ascending: bool,
    pub rub_only: bool,
    /// Currency to keep when `rub_only` is off.
    pub currency: Option<String>,
    pub search_word: Option<String>
}

impl Preferences {
    /// The search term exactly as given, if it is not empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search_word.as_deref().filter(|word| !word.is_empty())
    }

    /// The currency the currency stage keeps. `rub_only` wins over `currency`.
    pub fn currency_target(&self) -> Option<&str> {
        if self.rub_only {
            return Some(LOCAL_CURRENCY);
        }

        self.currency.as_deref().filter(|code| !code.is_empty())
    }
}

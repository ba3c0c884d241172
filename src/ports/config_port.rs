//! Configuration access port trait.
//!
//! Typed getters return `Ok(None)` for an absent key and `Err` when the key is
//! present but its value does not parse; callers decide the default.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found '{raw}'")]
pub struct InvalidValue {
    pub raw: String,
    pub expected: &'static str,
}

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, InvalidValue>;
    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, InvalidValue>;
}

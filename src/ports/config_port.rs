//! Configuration access port trait.

use chrono::NaiveDate;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_float(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// ISO `YYYY-MM-DD` date; `None` when the key is missing or malformed.
    /// Config validation rejects malformed values before this is relied on.
    fn get_date(&self, section: &str, key: &str) -> Option<NaiveDate> {
        self.get_string(section, key)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
    }
}

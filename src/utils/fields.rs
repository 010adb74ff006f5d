use serde::{Deserialize, Deserializer};

/// Keeps an explicit `null` distinguishable from a missing key:
/// missing → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
///
/// Use together with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trims `value`, returning `None` when nothing is left.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

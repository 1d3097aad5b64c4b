use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Deserialize any [`FromStr`] type from its string form
pub(crate) fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    let value = String::deserialize(deserializer)?;
    T::from_str(&value).map_err(serde::de::Error::custom)
}

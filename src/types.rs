use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ARCHIVE_SEPARATOR: char = '~';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(String);

impl ProfileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProfileId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "." || s == ".." {
            return Err("profile is empty".to_string());
        }
        if s.contains(ARCHIVE_SEPARATOR) {
            return Err(format!("profile {} must not contain '{}'", s, ARCHIVE_SEPARATOR));
        }
        if s.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
            return Err(format!("profile {} must be a single folder name", s));
        }
        Ok(ProfileId(s.to_string()))
    }
}

impl TryFrom<String> for ProfileId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProfileId> for String {
    fn from(id: ProfileId) -> Self {
        id.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunMode {
    pub dry_run: bool,
    pub verbose: bool,
}

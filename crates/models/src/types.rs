use chrono::{SubsecRound, Utc};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered list of display strings stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn as_slice(&self) -> &[String] { &self.0 }
}

impl From<Vec<String>> for StringList {
    fn from(v: Vec<String>) -> Self { Self(v) }
}

/// Current UTC time at microsecond precision, the finest every backend keeps.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).into()
}

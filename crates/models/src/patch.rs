//! Tri-state field for partial-update payloads.
//!
//! A JSON object field can be absent, explicitly `null`, or carry a value.
//! `Option<T>` folds the first two together, which makes "leave unchanged"
//! and "clear" indistinguishable. Fields of this type must be annotated
//! with `#[serde(default)]` so that absence deserializes as `Missing`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self { Patch::Missing }
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool { matches!(self, Patch::Missing) }
    pub fn is_null(&self) -> bool { matches!(self, Patch::Null) }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `None` = leave unchanged, `Some(None)` = clear, `Some(Some(v))` = set.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Value(v) => serializer.serialize_some(v),
            Patch::Missing | Patch::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Payload {
        #[serde(default, skip_serializing_if = "Patch::is_missing")]
        phone: Patch<String>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let absent: Payload = serde_json::from_value(json!({})).unwrap();
        let null: Payload = serde_json::from_value(json!({ "phone": null })).unwrap();
        let value: Payload = serde_json::from_value(json!({ "phone": "555" })).unwrap();
        assert_eq!(absent.phone, Patch::Missing);
        assert_eq!(null.phone, Patch::Null);
        assert_eq!(value.phone, Patch::Value("555".to_string()));
    }

    #[test]
    fn change_semantics() {
        assert_eq!(Patch::<i32>::Missing.into_change(), None);
        assert_eq!(Patch::<i32>::Null.into_change(), Some(None));
        assert_eq!(Patch::Value(3).into_change(), Some(Some(3)));
    }

    #[test]
    fn missing_is_skipped_on_output() {
        let out = serde_json::to_value(Payload { phone: Patch::Missing }).unwrap();
        assert_eq!(out, json!({}));
        let out = serde_json::to_value(Payload { phone: Patch::Null }).unwrap();
        assert_eq!(out, json!({ "phone": null }));
    }
}

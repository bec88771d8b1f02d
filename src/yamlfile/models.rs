use serde::de::{self, Visitor};

/// A scalar from the record file. YAML lets `MXPref: 10` and `MXPref: '10'`
/// mean the same thing, so every scalar is read as its string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldValue(String);

impl FieldValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for FieldValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FieldValue::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FieldValue(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FieldValue(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FieldValue(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FieldValue(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FieldValue(v.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for FieldValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// One entry of the record file. Fields are declared alphabetically so the
/// written file has a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRecord {
    #[serde(rename = "Address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FieldValue>,
    #[serde(rename = "HostName", default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<FieldValue>,
    #[serde(rename = "MXPref", default, skip_serializing_if = "Option::is_none")]
    pub mx_pref: Option<FieldValue>,
    #[serde(rename = "RecordType", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<FieldValue>,
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<FieldValue>,
}

impl FileRecord {
    /// Records are written sorted by type, then host name, then content.
    pub fn sort_key(
        &self,
    ) -> (
        Option<&FieldValue>,
        Option<&FieldValue>,
        Option<&FieldValue>,
        Option<&FieldValue>,
        Option<&FieldValue>,
    ) {
        (
            self.record_type.as_ref(),
            self.host_name.as_ref(),
            self.address.as_ref(),
            self.mx_pref.as_ref(),
            self.ttl.as_ref(),
        )
    }
}

impl std::fmt::Display for FileRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_missing = |value: &Option<FieldValue>| {
            value
                .as_ref()
                .map(FieldValue::to_string)
                .unwrap_or_else(|| "-".to_string())
        };
        write!(
            f,
            "{} {} {}",
            or_missing(&self.record_type),
            or_missing(&self.host_name),
            or_missing(&self.address)
        )?;
        if let Some(mx_pref) = &self.mx_pref {
            write!(f, " MXPref={mx_pref}")?;
        }
        if let Some(ttl) = &self.ttl {
            write!(f, " TTL={ttl}")?;
        }
        Ok(())
    }
}

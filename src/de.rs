use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Hourly rates arrive from forms as numbers or numeric strings, and broken
/// clients send arbitrary text. Anything that doesn't parse is treated as
/// not provided instead of failing the whole request.
pub fn lenient_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(LenientRateVisitor)
}

struct LenientRateVisitor;

impl<'de> Visitor<'de> for LenientRateVisitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an hourly rate as number or numeric string")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v as f64))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.trim().parse().ok())
    }

    fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientRateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Test {
        #[serde(default, deserialize_with = "super::lenient_rate")]
        rate: Option<f64>,
    }

    fn rate(value: serde_json::Value) -> Option<f64> {
        serde_json::from_value::<Test>(value).unwrap().rate
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(Some(15.0), rate(json!({"rate": 15.0})));
        assert_eq!(Some(20.0), rate(json!({"rate": 20})));
        assert_eq!(Some(-3.0), rate(json!({"rate": -3})));
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(Some(17.5), rate(json!({"rate": "17.5"})));
        assert_eq!(Some(15.0), rate(json!({"rate": " 15 "})));
    }

    #[test]
    fn garbage_becomes_absent() {
        assert_eq!(None, rate(json!({"rate": "abc"})));
        assert_eq!(None, rate(json!({"rate": ""})));
        assert_eq!(None, rate(json!({"rate": true})));
        assert_eq!(None, rate(json!({"rate": null})));
        assert_eq!(None, rate(json!({})));
    }
}

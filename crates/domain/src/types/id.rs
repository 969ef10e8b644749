//! Numeric resource identifiers and their normalization rules

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ErpError, Result};

/// Backend primary key of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(i64);

impl ResourceId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Normalize any supported input into an identifier.
    pub fn parse(input: impl IntoResourceId) -> Result<Self> {
        input.into_resource_id()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ResourceId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Conversion of caller-supplied identifiers into a [`ResourceId`].
///
/// Integral values are accepted whatever their representation; anything
/// non-numeric, fractional or absent is rejected with
/// [`ErpError::InvalidIdentifier`].
pub trait IntoResourceId {
    fn into_resource_id(self) -> Result<ResourceId>;
}

impl IntoResourceId for ResourceId {
    fn into_resource_id(self) -> Result<ResourceId> {
        Ok(self)
    }
}

macro_rules! impl_into_resource_id_lossless {
    ($($ty:ty),*) => {
        $(
            impl IntoResourceId for $ty {
                fn into_resource_id(self) -> Result<ResourceId> {
                    Ok(ResourceId(i64::from(self)))
                }
            }
        )*
    };
}

impl_into_resource_id_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl IntoResourceId for u64 {
    fn into_resource_id(self) -> Result<ResourceId> {
        i64::try_from(self)
            .map(ResourceId)
            .map_err(|_| ErpError::InvalidIdentifier(self.to_string()))
    }
}

impl IntoResourceId for f64 {
    fn into_resource_id(self) -> Result<ResourceId> {
        integral_float(self).ok_or_else(|| ErpError::InvalidIdentifier(self.to_string()))
    }
}

impl IntoResourceId for &str {
    fn into_resource_id(self) -> Result<ResourceId> {
        let trimmed = self.trim();
        if let Ok(raw) = trimmed.parse::<i64>() {
            return Ok(ResourceId(raw));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(integral_float)
            .ok_or_else(|| ErpError::InvalidIdentifier(self.to_string()))
    }
}

impl IntoResourceId for String {
    fn into_resource_id(self) -> Result<ResourceId> {
        self.as_str().into_resource_id()
    }
}

impl IntoResourceId for &String {
    fn into_resource_id(self) -> Result<ResourceId> {
        self.as_str().into_resource_id()
    }
}

impl IntoResourceId for &Value {
    fn into_resource_id(self) -> Result<ResourceId> {
        match self {
            Value::Number(number) => {
                if let Some(raw) = number.as_i64() {
                    Ok(ResourceId(raw))
                } else {
                    number
                        .as_f64()
                        .and_then(integral_float)
                        .ok_or_else(|| ErpError::InvalidIdentifier(number.to_string()))
                }
            }
            Value::String(text) => text.as_str().into_resource_id(),
            other => Err(ErpError::InvalidIdentifier(other.to_string())),
        }
    }
}

impl IntoResourceId for Value {
    fn into_resource_id(self) -> Result<ResourceId> {
        (&self).into_resource_id()
    }
}

impl<T: IntoResourceId> IntoResourceId for Option<T> {
    fn into_resource_id(self) -> Result<ResourceId> {
        match self {
            Some(inner) => inner.into_resource_id(),
            None => Err(ErpError::InvalidIdentifier("missing identifier".to_string())),
        }
    }
}

fn integral_float(raw: f64) -> Option<ResourceId> {
    if raw.is_finite() && raw.fract() == 0.0 && raw >= i64::MIN as f64 && raw < i64::MAX as f64 {
        Some(ResourceId(raw as i64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_numeric_representations() {
        assert_eq!(ResourceId::parse(5_i32).unwrap(), ResourceId::new(5));
        assert_eq!(ResourceId::parse("42").unwrap(), ResourceId::new(42));
        assert_eq!(ResourceId::parse(" 7 ").unwrap(), ResourceId::new(7));
        assert_eq!(ResourceId::parse("3.0").unwrap(), ResourceId::new(3));
        assert_eq!(ResourceId::parse(&json!(9)).unwrap(), ResourceId::new(9));
        assert_eq!(ResourceId::parse(&json!("11")).unwrap(), ResourceId::new(11));
        assert_eq!(ResourceId::parse(Some(8_u32)).unwrap(), ResourceId::new(8));
    }

    #[test]
    fn rejects_non_numeric_input() {
        for err in [
            ResourceId::parse("abc").unwrap_err(),
            ResourceId::parse("").unwrap_err(),
            ResourceId::parse(&json!(null)).unwrap_err(),
            ResourceId::parse(None::<i64>).unwrap_err(),
            ResourceId::parse(2.5_f64).unwrap_err(),
            ResourceId::parse(f64::NAN).unwrap_err(),
            ResourceId::parse(u64::MAX).unwrap_err(),
        ] {
            assert!(matches!(err, ErpError::InvalidIdentifier(_)), "unexpected {err:?}");
        }
    }
}

use serde::{Deserialize, Serialize};

/// Standard `{ message, data }` response of the pricing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// List endpoints answer either with an envelope or with the bare payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DataOrBare<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> DataOrBare<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_accepts_wrapped_and_bare_lists() {
        let wrapped: DataOrBare<Vec<Value>> =
            serde_json::from_str(r#"{"message":"ok","data":[{"id":1}]}"#).unwrap();
        assert_eq!(wrapped.into_inner().len(), 1);

        let bare: DataOrBare<Vec<Value>> = serde_json::from_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(bare.into_inner().len(), 2);
    }
}

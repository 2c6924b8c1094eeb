//! # Atlas API Keys
//!
//! Programmatic API key pair carried by every model. The private key is
//! wiped from memory when the value is dropped and never appears in `Debug`
//! output.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "PascalCase")]
pub struct ApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl ApiKeys {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            private_key: Some(private_key.into()),
        }
    }

    /// `(public, private)` when both keys are present and non-empty
    pub fn pair(&self) -> Option<(&str, &str)> {
        let public = self.public_key.as_deref().filter(|k| !k.is_empty())?;
        let private = self.private_key.as_deref().filter(|k| !k.is_empty())?;
        Some((public, private))
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("public_key", &self.public_key)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_requires_both_keys() {
        assert_eq!(ApiKeys::new("pub", "priv").pair(), Some(("pub", "priv")));
        assert_eq!(ApiKeys::new("pub", "").pair(), None);
        let only_public = ApiKeys {
            public_key: Some("pub".to_string()),
            private_key: None,
        };
        assert_eq!(only_public.pair(), None);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let rendered = format!("{:?}", ApiKeys::new("pub", "very-private"));
        assert!(rendered.contains("pub"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("very-private"));
    }

    #[test]
    fn test_wire_shape() {
        let keys: ApiKeys =
            serde_json::from_str(r#"{"PublicKey":"pub","PrivateKey":"priv"}"#).unwrap();
        assert_eq!(keys, ApiKeys::new("pub", "priv"));
    }
}

//! # Digest Authentication
//!
//! HTTP Digest access authentication (RFC 2617, MD5, `qop=auth`) as required
//! by the Atlas programmatic API keys. The public key is the username and the
//! private key the password.

use super::error::AtlasError;

/// A parsed `WWW-Authenticate: Digest ...` challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChallenge {
    pub realm: String,
    pub nonce: String,
    pub opaque: Option<String>,
    pub algorithm: Option<String>,
    /// Whether the server offered `qop=auth`
    pub qop_auth: bool,
}

impl DigestChallenge {
    pub fn parse(header: &str) -> Result<Self, AtlasError> {
        let header = header.trim();
        let params = match header.split_once(char::is_whitespace) {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("digest") => rest,
            _ => {
                return Err(AtlasError::Challenge(format!(
                    "not a Digest challenge: {header}"
                )))
            }
        };

        let mut realm = None;
        let mut nonce = None;
        let mut opaque = None;
        let mut algorithm = None;
        let mut qop_auth = false;
        for (key, value) in parse_params(params) {
            match key.to_ascii_lowercase().as_str() {
                "realm" => realm = Some(value),
                "nonce" => nonce = Some(value),
                "opaque" => opaque = Some(value),
                "algorithm" => algorithm = Some(value),
                "qop" => {
                    qop_auth = value
                        .split(',')
                        .any(|q| q.trim().eq_ignore_ascii_case("auth"));
                }
                _ => {}
            }
        }

        if let Some(algorithm) = &algorithm {
            if !algorithm.eq_ignore_ascii_case("MD5") {
                return Err(AtlasError::Challenge(format!(
                    "unsupported digest algorithm {algorithm}"
                )));
            }
        }

        Ok(Self {
            realm: realm.unwrap_or_default(),
            nonce: nonce.ok_or_else(|| AtlasError::Challenge("challenge has no nonce".to_string()))?,
            opaque,
            algorithm,
            qop_auth,
        })
    }

    /// Digest response hash for one request
    pub fn response(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        cnonce: &str,
        nonce_count: u32,
    ) -> String {
        let ha1 = hex_md5(&format!("{username}:{}:{password}", self.realm));
        let ha2 = hex_md5(&format!("{method}:{uri}"));
        if self.qop_auth {
            hex_md5(&format!(
                "{ha1}:{}:{nonce_count:08x}:{cnonce}:auth:{ha2}",
                self.nonce
            ))
        } else {
            hex_md5(&format!("{ha1}:{}:{ha2}", self.nonce))
        }
    }

    /// Value of the `Authorization` header answering this challenge
    pub fn authorization(
        &self,
        username: &str,
        password: &str,
        method: &str,
        uri: &str,
        cnonce: &str,
        nonce_count: u32,
    ) -> String {
        let response = self.response(username, password, method, uri, cnonce, nonce_count);
        let mut header = format!(
            r#"Digest username="{username}", realm="{}", nonce="{}", uri="{uri}", response="{response}""#,
            self.realm, self.nonce
        );
        if let Some(algorithm) = &self.algorithm {
            header.push_str(&format!(", algorithm={algorithm}"));
        }
        if self.qop_auth {
            header.push_str(&format!(
                r#", qop=auth, nc={nonce_count:08x}, cnonce="{cnonce}""#
            ));
        }
        if let Some(opaque) = &self.opaque {
            header.push_str(&format!(r#", opaque="{opaque}""#));
        }
        header
    }
}

fn hex_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// Split `key=value, key="quoted, value"` pairs
fn parse_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace() || *c == ',') {
            chars.next();
        }
        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && *c != ',') {
            key.push(c);
        }
        if key.is_empty() {
            break;
        }
        if chars.next_if_eq(&'=').is_none() {
            params.push((key.trim().to_string(), String::new()));
            continue;
        }

        let mut value = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            value.push(escaped);
                        }
                    }
                    '"' => break,
                    _ => value.push(c),
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| *c != ',') {
                value.push(c);
            }
        }
        params.push((key.trim().to_string(), value.trim().to_string()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 2617 section 3.5
    const RFC_CHALLENGE: &str = r#"Digest realm="testrealm@host.com", qop="auth,auth-int", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", opaque="5ccc069c403ebaf9f0171e9517f40e41""#;

    #[test]
    fn test_parse_rfc_challenge() {
        let challenge = DigestChallenge::parse(RFC_CHALLENGE).unwrap();
        assert_eq!(challenge.realm, "testrealm@host.com");
        assert_eq!(challenge.nonce, "dcd98b7102dd2f0e8b11d0f600bfb0c093");
        assert_eq!(
            challenge.opaque.as_deref(),
            Some("5ccc069c403ebaf9f0171e9517f40e41")
        );
        assert!(challenge.qop_auth);
    }

    #[test]
    fn test_rfc_response_vector() {
        let challenge = DigestChallenge::parse(RFC_CHALLENGE).unwrap();
        let response = challenge.response(
            "Mufasa",
            "Circle Of Life",
            "GET",
            "/dir/index.html",
            "0a4f113b",
            1,
        );
        assert_eq!(response, "6629fae49393a05397450978507c4ef1");
    }

    #[test]
    fn test_authorization_header() {
        let challenge = DigestChallenge::parse(RFC_CHALLENGE).unwrap();
        let header = challenge.authorization(
            "Mufasa",
            "Circle Of Life",
            "GET",
            "/dir/index.html",
            "0a4f113b",
            1,
        );
        assert!(header.starts_with(r#"Digest username="Mufasa", realm="testrealm@host.com""#));
        assert!(header.contains(r#"response="6629fae49393a05397450978507c4ef1""#));
        assert!(header.contains("qop=auth, nc=00000001"));
        assert!(header.contains(r#"opaque="5ccc069c403ebaf9f0171e9517f40e41""#));
    }

    #[test]
    fn test_atlas_style_challenge() {
        let challenge = DigestChallenge::parse(
            r#"Digest realm="MMS Public API", domain="", nonce="abc/def+ghi", algorithm=MD5, qop="auth", stale=false"#,
        )
        .unwrap();
        assert_eq!(challenge.realm, "MMS Public API");
        assert_eq!(challenge.nonce, "abc/def+ghi");
        assert_eq!(challenge.algorithm.as_deref(), Some("MD5"));
        assert!(challenge.qop_auth);
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(DigestChallenge::parse(r#"Basic realm="x""#).is_err());
        assert!(DigestChallenge::parse(r#"Digest realm="x""#).is_err());
        assert!(DigestChallenge::parse(r#"Digest realm="x", nonce="n", algorithm=SHA-256"#).is_err());
    }
}

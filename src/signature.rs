use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::crypto;
use jsonwebtoken::jwk::AlgorithmParameters;
use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::jwk::RSAKeyParameters;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use serde::Deserialize;

use crate::error::Error;
use crate::error::Result;

const RS256: &str = "RS256";

/// The header fields the verifier reads
///
/// `alg` stays a plain string so that an unknown or missing algorithm does
/// not hide a missing or unknown `kid`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenHeader {
    pub(crate) alg: Option<String>,
    pub(crate) kid: Option<String>,
}

impl TokenHeader {
    fn decode(segment: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|e| malformed(&format!("header is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| malformed(&format!("header is not a JSON object: {e}")))
    }
}

/// A compact-serialized token split into its segments
///
/// Segments borrow from the input string so the signature is checked over
/// the bytes exactly as received.
#[derive(Debug)]
pub(crate) struct CompactToken<'a> {
    pub(crate) header: TokenHeader,
    /// `header.payload`, the signed part of the token
    signing_input: &'a str,
    pub(crate) payload: &'a str,
    signature: &'a str,
}

impl<'a> CompactToken<'a> {
    pub(crate) fn parse(token: &'a str) -> Result<Self> {
        let (signing_input, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| malformed("expected three segments"))?;
        let (header_segment, payload) = signing_input
            .split_once('.')
            .ok_or_else(|| malformed("expected three segments"))?;

        if header_segment.is_empty() || payload.contains('.') || signature.is_empty() {
            return Err(malformed("expected three segments"));
        }

        let header = TokenHeader::decode(header_segment)?;

        Ok(Self {
            header,
            signing_input,
            payload,
            signature,
        })
    }

    pub(crate) fn kid(&self) -> Option<&str> {
        self.header.kid.as_deref()
    }
}

/// Check the token's RS256 signature against the given key
///
/// `Ok(false)` means the signature does not match the key. Tokens using any
/// other algorithm and non-RSA keys are rejected as invalid.
pub(crate) fn verify(token: &CompactToken<'_>, jwk: &Jwk) -> Result<bool> {
    if token.header.alg.as_deref() != Some(RS256) {
        return Err(Error::InvalidToken(format!(
            "unsupported algorithm {:?}",
            token.header.alg
        )));
    }

    let key = rsa_decoding_key(jwk)?;

    Ok(crypto::verify(
        token.signature,
        token.signing_input.as_bytes(),
        &key,
        Algorithm::RS256,
    )?)
}

fn rsa_decoding_key(jwk: &Jwk) -> Result<DecodingKey> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(RSAKeyParameters { n, e, .. }) => {
            Ok(DecodingKey::from_rsa_components(n, e)?)
        }
        other => Err(Error::InvalidToken(format!(
            "key is not an RSA key: {other:?}"
        ))),
    }
}

fn malformed(reason: &str) -> Error {
    Error::InvalidToken(format!("malformed token, {reason}"))
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a verification or key-set acquisition can fail.
///
/// Each variant maps to a stable numeric code (see [`Error::code`]) so callers
/// can branch on it or forward it over the wire without matching on message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Failed to fetch JWKS: {0}")]
    JwksFetchFailed(String),
    #[error("Invalid JWKS format: {0}")]
    JwksInvalidFormat(String),
    #[error("No 'kid' found in the token header.")]
    NoKidInToken,
    #[error("No JWK found for kid: {0}")]
    NoJwkForKid(String),
    #[error("Token signature verification failed.")]
    SignatureVerificationFailed,
    #[error("Failed to decode token payload.")]
    TokenPayloadDecodingFailed,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Invalid token issuer: {0}")]
    InvalidIssuer(String),
    #[error("Token has expired. Expiration timestamp: {0}")]
    TokenExpired(i64),
    #[error("Invalid audience in id_token.")]
    InvalidAudience,
    #[error("Missing subject in id_token.")]
    MissingSubject,
    #[error("Invalid access token: client_id mismatch.")]
    InvalidClientIdAccess,
}

impl Error {
    pub const JWKS_FETCH_FAILED: u16 = 1001;
    pub const JWKS_INVALID_FORMAT: u16 = 1002;
    pub const NO_KID_IN_TOKEN: u16 = 1003;
    pub const NO_JWK_FOR_KID: u16 = 1004;
    pub const SIGNATURE_VERIFICATION_FAILED: u16 = 1005;
    pub const TOKEN_PAYLOAD_DECODING_FAILED: u16 = 1006;
    pub const INVALID_TOKEN: u16 = 1007;
    pub const INVALID_ISSUER: u16 = 1008;
    pub const TOKEN_EXPIRED: u16 = 1009;
    pub const INVALID_AUDIENCE: u16 = 1010;
    pub const MISSING_SUBJECT: u16 = 1011;
    pub const INVALID_CLIENT_ID_ACCESS: u16 = 1012;

    /// Numeric code of this error kind
    pub fn code(&self) -> u16 {
        match self {
            Self::JwksFetchFailed(_) => Self::JWKS_FETCH_FAILED,
            Self::JwksInvalidFormat(_) => Self::JWKS_INVALID_FORMAT,
            Self::NoKidInToken => Self::NO_KID_IN_TOKEN,
            Self::NoJwkForKid(_) => Self::NO_JWK_FOR_KID,
            Self::SignatureVerificationFailed => Self::SIGNATURE_VERIFICATION_FAILED,
            Self::TokenPayloadDecodingFailed => Self::TOKEN_PAYLOAD_DECODING_FAILED,
            Self::InvalidToken(_) => Self::INVALID_TOKEN,
            Self::InvalidIssuer(_) => Self::INVALID_ISSUER,
            Self::TokenExpired(_) => Self::TOKEN_EXPIRED,
            Self::InvalidAudience => Self::INVALID_AUDIENCE,
            Self::MissingSubject => Self::MISSING_SUBJECT,
            Self::InvalidClientIdAccess => Self::INVALID_CLIENT_ID_ACCESS,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        Error::InvalidToken(error.to_string())
    }
}

pub(crate) fn fetch_jwks_error(error: reqwest::Error) -> Error {
    Error::JwksFetchFailed(error.to_string())
}

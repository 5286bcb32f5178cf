//! API token formatting, parsing, and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::records::ApiTokenUuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "uc";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 16;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

/// Build a fresh raw token of the form `uc_<token uuid>_<secret>`.
#[must_use]
pub fn generate_api_token(token_uuid: ApiTokenUuid) -> String {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    format!(
        "{API_TOKEN_PREFIX}_{}_{}",
        token_uuid.into_uuid().simple(),
        encode_hex(&secret)
    )
}

/// Check a raw token's shape and return the token UUID it names.
pub fn parse_api_token(token: &str) -> Result<ApiTokenUuid, ApiTokenError> {
    let mut parts = token.splitn(3, '_');

    let prefix = parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let secret_hex = parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let token_uuid =
        Uuid::try_parse(token_uuid_segment).map_err(|_| ApiTokenError::InvalidFormat)?;

    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS
        || !secret_hex.bytes().all(|byte| byte.is_ascii_hexdigit())
    {
        return Err(ApiTokenError::InvalidSecretEncoding);
    }

    Ok(ApiTokenUuid::from_uuid(token_uuid))
}

/// SHA-256 digest of the raw token as lowercase hex. Only this is stored.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

//! Identity reference codec.
//!
//! # Responsibility
//! - Classify a raw reference as canonical hex, `npub` key or `nprofile`
//!   pointer.
//! - Decode either bech32 form to the canonical lowercase hex key.
//! - Encode canonical keys to the `npub` display form.
//!
//! # Invariants
//! - `to_canonical(&to_display_form(k)?)? == k` for every lowercase 64-char
//!   hex key `k`.
//! - Decoding a pointer yields the same key as decoding the `npub` of that
//!   key; relay hints are not part of the canonical form.
//! - Input without a bech32 prefix is returned unchanged.

use bech32::{FromBase32, ToBase32, Variant};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NPUB_HRP: &str = "npub";
pub const NPROFILE_HRP: &str = "nprofile";
pub const NOSTR_URI_SCHEME: &str = "nostr:";

const PUBLIC_KEY_LEN: usize = 32;
const HEX_KEY_LEN: usize = PUBLIC_KEY_LEN * 2;
const TLV_PUBKEY: u8 = 0;
const TLV_RELAY: u8 = 1;

/// Failure to encode a canonical key into its display form.
#[derive(Debug)]
pub enum EncodingError {
    /// Key has the wrong number of hex characters.
    InvalidLength(usize),
    InvalidHex(hex::FromHexError),
    /// Relay hint longer than one TLV entry can carry.
    RelayTooLong(usize),
    Bech32(bech32::Error),
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(
                f,
                "public key must be {HEX_KEY_LEN} hex characters, got {len}"
            ),
            Self::InvalidHex(err) => write!(f, "public key is not valid hex: {err}"),
            Self::RelayTooLong(len) => write!(f, "relay hint too long: {len} bytes"),
            Self::Bech32(err) => write!(f, "bech32 encoding failed: {err}"),
        }
    }
}

impl Error for EncodingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidHex(err) => Some(err),
            Self::Bech32(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure to decode a bech32 identity reference.
#[derive(Debug)]
pub enum DecodingError {
    /// Checksum, charset, case or padding failure.
    Bech32(bech32::Error),
    /// Encoded with bech32m instead of bech32.
    UnsupportedVariant,
    /// Human-readable prefix is not the one the reference claimed.
    UnexpectedPrefix { expected: &'static str, found: String },
    /// Key payload is not 32 bytes.
    InvalidLength(usize),
    /// Pointer has no key entry.
    MissingPubkey,
    /// Pointer TLV stream is truncated.
    MalformedTlv,
}

impl Display for DecodingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bech32(err) => write!(f, "invalid bech32 string: {err}"),
            Self::UnsupportedVariant => write!(f, "bech32m identity strings are not supported"),
            Self::UnexpectedPrefix { expected, found } => {
                write!(f, "expected `{expected}` prefix, found `{found}`")
            }
            Self::InvalidLength(len) => {
                write!(f, "public key must be {PUBLIC_KEY_LEN} bytes, got {len}")
            }
            Self::MissingPubkey => write!(f, "profile pointer carries no public key"),
            Self::MalformedTlv => write!(f, "profile pointer TLV data is truncated"),
        }
    }
}

impl Error for DecodingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bech32(err) => Some(err),
            _ => None,
        }
    }
}

impl From<bech32::Error> for DecodingError {
    fn from(value: bech32::Error) -> Self {
        Self::Bech32(value)
    }
}

/// Classified identity reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityReference {
    /// No bech32 prefix; treated as the canonical hex key as-is.
    Canonical(String),
    /// `npub1...` string (scheme prefix stripped).
    Key(String),
    /// `nprofile1...` string (scheme prefix stripped).
    ProfilePointer(String),
}

impl IdentityReference {
    /// Classifies `raw` by its bech32 prefix, ignoring case, surrounding
    /// whitespace and a leading `nostr:` scheme.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let body = strip_scheme(trimmed);
        let lowered = body.to_ascii_lowercase();

        if lowered.starts_with("npub1") {
            Self::Key(body.to_string())
        } else if lowered.starts_with("nprofile1") {
            Self::ProfilePointer(body.to_string())
        } else {
            Self::Canonical(raw.to_string())
        }
    }
}

/// Decoded profile pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePointer {
    /// Canonical lowercase hex key.
    pub pubkey: String,
    pub relays: Vec<String>,
}

/// Resolves any reference to the canonical hex key used for data lookups.
///
/// Pointer relay hints are discarded. Unprefixed input passes through
/// unchanged.
pub fn to_canonical(reference: &str) -> Result<String, DecodingError> {
    match IdentityReference::parse(reference) {
        IdentityReference::Canonical(raw) => Ok(raw),
        IdentityReference::Key(encoded) => decode_key(&encoded),
        IdentityReference::ProfilePointer(encoded) => {
            decode_profile_pointer(&encoded).map(|pointer| pointer.pubkey)
        }
    }
}

/// Encodes a canonical hex key as an `npub` string.
pub fn to_display_form(hex_key: &str) -> Result<String, EncodingError> {
    let key = parse_hex_key(hex_key)?;
    bech32::encode(NPUB_HRP, key.to_base32(), Variant::Bech32).map_err(EncodingError::Bech32)
}

/// Encodes a canonical hex key plus relay hints as an `nprofile` string.
pub fn encode_profile_pointer<R: AsRef<str>>(
    hex_key: &str,
    relays: &[R],
) -> Result<String, EncodingError> {
    let key = parse_hex_key(hex_key)?;

    let mut tlv = Vec::with_capacity(2 + PUBLIC_KEY_LEN);
    tlv.push(TLV_PUBKEY);
    tlv.push(PUBLIC_KEY_LEN as u8);
    tlv.extend_from_slice(&key);
    for relay in relays {
        let bytes = relay.as_ref().as_bytes();
        let len = u8::try_from(bytes.len()).map_err(|_| EncodingError::RelayTooLong(bytes.len()))?;
        tlv.push(TLV_RELAY);
        tlv.push(len);
        tlv.extend_from_slice(bytes);
    }

    bech32::encode(NPROFILE_HRP, tlv.to_base32(), Variant::Bech32).map_err(EncodingError::Bech32)
}

/// Decodes an `nprofile` string into its key and relay hints.
///
/// Unknown TLV entries are skipped; the first key entry wins.
pub fn decode_profile_pointer(encoded: &str) -> Result<ProfilePointer, DecodingError> {
    let payload = decode_payload(strip_scheme(encoded.trim()), NPROFILE_HRP)?;

    let mut pubkey = None;
    let mut relays = Vec::new();
    let mut rest = payload.as_slice();
    while !rest.is_empty() {
        let [kind, len, tail @ ..] = rest else {
            return Err(DecodingError::MalformedTlv);
        };
        let len = usize::from(*len);
        if tail.len() < len {
            return Err(DecodingError::MalformedTlv);
        }
        let (value, next) = tail.split_at(len);
        match *kind {
            TLV_PUBKEY if pubkey.is_none() => {
                if value.len() != PUBLIC_KEY_LEN {
                    return Err(DecodingError::InvalidLength(value.len()));
                }
                pubkey = Some(hex::encode(value));
            }
            TLV_RELAY => relays.push(String::from_utf8_lossy(value).into_owned()),
            _ => {}
        }
        rest = next;
    }

    let pubkey = pubkey.ok_or(DecodingError::MissingPubkey)?;
    Ok(ProfilePointer { pubkey, relays })
}

/// Best-effort canonical form: the decoded key, or `reference` unchanged when
/// decoding fails.
pub fn canonical_or_raw(reference: &str) -> String {
    to_canonical(reference).unwrap_or_else(|err| {
        warn!("event=identity_decode module=identity status=recovered error={err}");
        reference.to_string()
    })
}

/// Best-effort display form: the `npub` of the reference's key, or
/// `reference` unchanged when it cannot be resolved.
pub fn display_or_raw(reference: &str) -> String {
    let canonical = match to_canonical(reference) {
        Ok(canonical) => canonical,
        Err(err) => {
            warn!("event=identity_decode module=identity status=recovered error={err}");
            return reference.to_string();
        }
    };
    to_display_form(&canonical).unwrap_or_else(|err| {
        warn!("event=identity_encode module=identity status=recovered error={err}");
        reference.to_string()
    })
}

fn decode_key(encoded: &str) -> Result<String, DecodingError> {
    let payload = decode_payload(encoded, NPUB_HRP)?;
    if payload.len() != PUBLIC_KEY_LEN {
        return Err(DecodingError::InvalidLength(payload.len()));
    }
    Ok(hex::encode(payload))
}

fn decode_payload(encoded: &str, expected_hrp: &'static str) -> Result<Vec<u8>, DecodingError> {
    let (hrp, data, variant) = bech32::decode(encoded)?;
    if variant != Variant::Bech32 {
        return Err(DecodingError::UnsupportedVariant);
    }
    if hrp != expected_hrp {
        return Err(DecodingError::UnexpectedPrefix {
            expected: expected_hrp,
            found: hrp,
        });
    }
    Ok(Vec::<u8>::from_base32(&data)?)
}

fn parse_hex_key(hex_key: &str) -> Result<[u8; PUBLIC_KEY_LEN], EncodingError> {
    let trimmed = hex_key.trim();
    if trimmed.len() != HEX_KEY_LEN {
        return Err(EncodingError::InvalidLength(trimmed.len()));
    }
    let mut key = [0u8; PUBLIC_KEY_LEN];
    hex::decode_to_slice(trimmed, &mut key).map_err(EncodingError::InvalidHex)?;
    Ok(key)
}

fn strip_scheme(value: &str) -> &str {
    match value.get(..NOSTR_URI_SCHEME.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(NOSTR_URI_SCHEME) => {
            &value[NOSTR_URI_SCHEME.len()..]
        }
        _ => value,
    }
}

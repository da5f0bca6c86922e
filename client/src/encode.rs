//! Payload framing: fixed widths, field order, key attachment.
//!
//! The cryptographic transform itself is delegated through [`Cipher`] to
//! the MPC cluster's published scheme; this module only guarantees the
//! shape the cluster and the program expect. Values are validated against
//! their declared domain before anything touches the network.

use crate::error::DomainError;
use crate::ident;
use crate::kind::Domain;

/// Declared widths of the zero-padded UTF-8 metadata slots.
pub const TITLE_WIDTH: usize = 32;
pub const CONTENT_WIDTH: usize = 128;
pub const TOPIC_WIDTH: usize = 16;
pub const QUESTION_WIDTH: usize = 64;

/// The encryption seam.
///
/// Implementations must provide the cluster's published cipher; this crate
/// deliberately ships no production implementation and never writes
/// plaintext into a ciphertext field. [`crate::testing::TestCipher`] exists
/// for tests only.
pub trait Cipher: Send + Sync {
    /// The 32-byte key material attached to every payload, identifying the
    /// encrypting party and recipient cluster key.
    fn public_key(&self) -> [u8; 32];

    /// Seals one small value into a fixed 32-byte ciphertext word.
    fn seal_word(&self, plaintext: u64, nonce: u128) -> [u8; 32];

    /// Seals a zero-padded metadata slot in place.
    fn seal_slot(&self, nonce: u128, slot: &mut [u8]);
}

/// One encrypted response, framed for submission.
///
/// The nonce is fresh per request and must never repeat for the same key
/// within the record's validity window.
#[derive(Debug, Clone)]
pub struct EncryptedPayload {
    pub ciphertext: [u8; 32],
    pub public_key: [u8; 32],
    pub nonce: u128,
}

/// A plaintext response before framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseValue {
    /// A 1-5 rating (opinion surveys and post feedback).
    Rating(u8),
    /// A yes/no ballot (polls).
    Choice(bool),
}

/// Plaintext record metadata before framing.
#[derive(Debug, Clone)]
pub enum RecordMetadata {
    /// Title/content/topic, for surveys and posts.
    Titled {
        title: String,
        content: String,
        topic: String,
    },
    /// A single question, for polls.
    Question(String),
}

/// Metadata after padding and sealing, ready for the create instruction.
#[derive(Debug, Clone)]
pub(crate) enum EncodedMetadata {
    Titled {
        title: [u8; TITLE_WIDTH],
        content: [u8; CONTENT_WIDTH],
        topic: [u8; TOPIC_WIDTH],
    },
    Question([u8; QUESTION_WIDTH]),
}

/// Zero-pads `text` into an `N`-byte slot.
pub fn pad_text<const N: usize>(
    field: &'static str,
    text: &str,
) -> Result<[u8; N], DomainError> {
    pad_bytes(field, text.as_bytes())
}

/// Zero-pads raw bytes into an `N`-byte slot.
pub fn pad_bytes<const N: usize>(
    field: &'static str,
    bytes: &[u8],
) -> Result<[u8; N], DomainError> {
    if bytes.len() > N {
        return Err(DomainError::TextTooLong {
            field,
            len: bytes.len(),
            max: N,
        });
    }
    let mut slot = [0u8; N];
    slot[..bytes.len()].copy_from_slice(bytes);
    Ok(slot)
}

/// Validates `value` against the domain and frames it for submission.
///
/// Consumes one fresh nonce from the identifier generator. This is the one
/// validation performed entirely locally: out-of-range values fail here
/// with no network call issued.
pub fn encode_response(
    domain: Domain,
    value: ResponseValue,
    cipher: &dyn Cipher,
) -> Result<EncryptedPayload, DomainError> {
    let word = match (domain, value) {
        (Domain::Opinion | Domain::Feedback, ResponseValue::Rating(rating)) => {
            if !(1..=5).contains(&rating) {
                return Err(DomainError::RatingOutOfRange(rating));
            }
            rating as u64
        }
        (Domain::Vote, ResponseValue::Choice(choice)) => choice as u64,
        _ => return Err(DomainError::ValueMismatch { domain }),
    };

    let nonce = ident::fresh_nonce();
    Ok(EncryptedPayload {
        ciphertext: cipher.seal_word(word, nonce),
        public_key: cipher.public_key(),
        nonce,
    })
}

/// Pads and seals record metadata for the create instruction.
///
/// `content` arrives as raw bytes so an oversized payload can be replaced
/// by a content identifier before framing.
pub(crate) fn encode_metadata(
    domain: Domain,
    meta: &RecordMetadata,
    content_bytes: &[u8],
    cipher: &dyn Cipher,
    nonce: u128,
) -> Result<EncodedMetadata, DomainError> {
    match (domain, meta) {
        (Domain::Opinion | Domain::Feedback, RecordMetadata::Titled { title, topic, .. }) => {
            let mut title: [u8; TITLE_WIDTH] = pad_text("title", title)?;
            let mut content: [u8; CONTENT_WIDTH] = pad_bytes("content", content_bytes)?;
            let mut topic: [u8; TOPIC_WIDTH] = pad_text("topic", topic)?;
            cipher.seal_slot(nonce, &mut title);
            cipher.seal_slot(nonce, &mut content);
            cipher.seal_slot(nonce, &mut topic);
            Ok(EncodedMetadata::Titled {
                title,
                content,
                topic,
            })
        }
        (Domain::Vote, RecordMetadata::Question(question)) => {
            let mut question: [u8; QUESTION_WIDTH] = pad_text("question", question)?;
            cipher.seal_slot(nonce, &mut question);
            Ok(EncodedMetadata::Question(question))
        }
        _ => Err(DomainError::MetadataMismatch { domain }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestCipher;

    #[test]
    fn ratings_outside_range_are_rejected() {
        let cipher = TestCipher::new([7u8; 32]);
        for bad in [0u8, 6, 200] {
            let err = encode_response(Domain::Opinion, ResponseValue::Rating(bad), &cipher);
            assert!(matches!(err, Err(DomainError::RatingOutOfRange(r)) if r == bad));
        }
        for good in 1u8..=5 {
            assert!(encode_response(Domain::Opinion, ResponseValue::Rating(good), &cipher).is_ok());
        }
    }

    #[test]
    fn value_kind_must_match_domain() {
        let cipher = TestCipher::new([7u8; 32]);
        assert!(matches!(
            encode_response(Domain::Vote, ResponseValue::Rating(3), &cipher),
            Err(DomainError::ValueMismatch { .. })
        ));
        assert!(matches!(
            encode_response(Domain::Opinion, ResponseValue::Choice(true), &cipher),
            Err(DomainError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn payload_carries_key_and_fresh_nonce() {
        let cipher = TestCipher::new([9u8; 32]);
        let a = encode_response(Domain::Vote, ResponseValue::Choice(true), &cipher).unwrap();
        let b = encode_response(Domain::Vote, ResponseValue::Choice(true), &cipher).unwrap();
        assert_eq!(a.public_key, cipher.public_key());
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn text_is_zero_padded_and_bounded() {
        let slot: [u8; 8] = pad_text("field", "hi").unwrap();
        assert_eq!(&slot[..2], b"hi");
        assert_eq!(&slot[2..], &[0u8; 6]);

        let too_long = pad_text::<8>("field", "way too long for slot");
        assert!(matches!(too_long, Err(DomainError::TextTooLong { .. })));
    }

    #[test]
    fn sealed_word_roundtrips_through_the_test_cipher() {
        let cipher = TestCipher::new([1u8; 32]);
        let nonce = 42u128;
        for rating in 1u64..=5 {
            let ciphertext = cipher.seal_word(rating, nonce);
            assert_eq!(crate::testing::unseal_word(&[1u8; 32], nonce, &ciphertext), rating);
        }
    }
}

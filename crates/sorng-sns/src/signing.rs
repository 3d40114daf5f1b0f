//! AWS Signature Version 2 (HmacSHA256).
//!
//! <https://docs.aws.amazon.com/general/latest/gr/signature-version-2.html>
//!
//! The signature is `base64(HMAC-SHA256(secret, string_to_sign))`, where the
//! string to sign is produced by [`crate::canonical`].

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Value of the `SignatureMethod` parameter.
pub const SIGNATURE_METHOD: &str = "HmacSHA256";

/// Value of the `SignatureVersion` parameter.
pub const SIGNATURE_VERSION: &str = "2";

/// Sign `string_to_sign` with `secret` and return the base64 signature.
pub fn sign_v2(string_to_sign: &str, secret: &str) -> String {
    base64::engine::general_purpose::STANDARD
        .encode(hmac_sha256(secret.as_bytes(), string_to_sign.as_bytes()))
}

/// Compute HMAC-SHA256.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 1.
    #[test]
    fn rfc4231_case_1() {
        let key = [0x0bu8; 20];
        let digest = hmac_sha256(&key, b"Hi There");
        assert_eq!(
            digest,
            [
                0xb0, 0x34, 0x4c, 0x61, 0xd8, 0xdb, 0x38, 0x53, 0x5c, 0xa8, 0xaf, 0xce, 0xaf, 0x0b,
                0xf1, 0x2b, 0x88, 0x1d, 0xc2, 0x00, 0xc9, 0x83, 0x3d, 0xa7, 0x26, 0xe9, 0x37, 0x6c,
                0x2e, 0x32, 0xcf, 0xf7,
            ]
        );
    }

    // RFC 4231 test case 2, through the public base64 path.
    #[test]
    fn rfc4231_case_2_base64() {
        assert_eq!(
            sign_v2("what do ya want for nothing?", "Jefe"),
            "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM="
        );
    }

    #[test]
    fn signs_sns_publish_request() {
        let string_to_sign = "GET\nsns.us-east-1.amazonaws.com\n/\n\
            AWSAccessKeyId=AKIDEXAMPLE&Action=Publish&Message=Hello%20world\
            &SignatureMethod=HmacSHA256&SignatureVersion=2\
            &Timestamp=2015-06-01T12%3A00%3A00Z\
            &TopicArn=arn%3Aaws%3Asns%3Aus-east-1%3A123456789012%3ASNSTest";
        assert_eq!(
            sign_v2(string_to_sign, "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
            "LW+fwKkWir8A3Jz7qsQhvsJnAOAmYwpVRREqUFtrPDg="
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let a = sign_v2("GET\nhost\n/\nA=1", "secret");
        let b = sign_v2("GET\nhost\n/\nA=1", "secret");
        assert_eq!(a, b);
        // 32-byte digest → 44 base64 chars with padding
        assert_eq!(a.len(), 44);
    }

    #[test]
    fn signature_changes_with_input_or_key() {
        let base = sign_v2("GET\nhost\n/\nA=1", "secret");
        assert_ne!(base, sign_v2("GET\nhost\n/\nA=2", "secret"));
        assert_ne!(base, sign_v2("GET\nhost\n/\nA=1", "secret2"));
    }
}

//! Hash related utils.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use md5::Digest;
use md5::Md5;
use sha1::Sha1;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 encoded MD5 digest, the form `Content-Md5` headers take.
pub fn base64_md5(content: &[u8]) -> String {
    base64_encode(Md5::digest(content).as_slice())
}

/// Base64 encoded HMAC with SHA1 hash.
pub fn base64_hmac_sha1(key: &[u8], content: &[u8]) -> String {
    let mut h = Hmac::<Sha1>::new_from_slice(key).expect("invalid key length");
    h.update(content);

    base64_encode(&h.finalize().into_bytes())
}

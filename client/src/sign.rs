//! Canonical string construction and HMAC-SHA1 request signing.
//!
//! The service verifies requests against a newline joined canonical
//! string: the verb, three fixed headers, the sorted service headers and
//! the resource path. Both sides must produce these bytes exactly, so
//! everything here is deterministic for a fixed set of inputs.

use std::fmt::Write;

use http::header::{AsHeaderName, CONTENT_TYPE, DATE};
use http::{HeaderMap, Method};
use log::debug;
use oss_client_core::hash::base64_hmac_sha1;
use oss_client_core::Result;

use crate::constants::CONTENT_MD5;
use crate::credential::Credential;

/// Build the canonical string a signature covers.
///
/// Layout is `VERB`, `Content-Md5`, `Content-Type` and `Date` on one
/// line each, then the sorted `x-oss` headers as `name:value` lines,
/// then the resource path. Absent headers contribute empty lines and
/// nothing else participates, so unsigned headers can change freely
/// without breaking the signature.
pub fn string_to_sign(method: &Method, headers: &HeaderMap, resource: &str) -> Result<String> {
    let mut s = String::new();
    writeln!(&mut s, "{}", method.as_str())?;
    writeln!(&mut s, "{}", header_str(headers, CONTENT_MD5))?;
    writeln!(&mut s, "{}", header_str(headers, CONTENT_TYPE))?;
    writeln!(&mut s, "{}", header_str(headers, DATE))?;

    let canonicalized_headers = canonicalize_headers(headers);
    if !canonicalized_headers.is_empty() {
        writeln!(&mut s, "{canonicalized_headers}")?;
    }

    write!(&mut s, "{resource}")?;

    debug!("string to sign: {s}");
    Ok(s)
}

/// The `Authorization` header value for a canonical string, in the form
/// `OSS {access_key_id}:{signature}`.
pub fn authorization(cred: &Credential, string_to_sign: &str) -> String {
    let signature = base64_hmac_sha1(cred.access_key_secret.as_bytes(), string_to_sign.as_bytes());
    format!("OSS {}:{}", cred.access_key_id, signature)
}

fn header_str<K: AsHeaderName>(headers: &HeaderMap, name: K) -> &str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Service headers as `name:value` lines sorted by name. Stored header
/// names are already lowercase; every name containing `x-oss`
/// participates.
fn canonicalize_headers(headers: &HeaderMap) -> String {
    let mut oss_headers = Vec::new();
    for (name, value) in headers.iter() {
        if !name.as_str().contains("x-oss") {
            continue;
        }
        if let Ok(value) = value.to_str() {
            oss_headers.push((name.as_str(), value));
        }
    }
    oss_headers.sort_by(|x, y| x.0.cmp(y.0));

    oss_headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_LENGTH;

    use super::*;

    fn cred() -> Credential {
        Credential::new(
            "testAccessKeyId".to_string(),
            "testAccessKeySecret".to_string(),
        )
    }

    #[test]
    fn test_signature_matches_known_token() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(DATE, "Mon, 20 Jan 2014 06:38:31 GMT".parse().unwrap());
        headers.insert(CONTENT_LENGTH, "0".parse().unwrap());

        let s = string_to_sign(
            &Method::POST,
            &headers,
            "/8e3c880e-1962-4792-925f-57c05efc0b0b/?acl",
        )?;
        assert_eq!(
            s,
            "POST\n\n\nMon, 20 Jan 2014 06:38:31 GMT\n/8e3c880e-1962-4792-925f-57c05efc0b0b/?acl"
        );
        assert_eq!(
            authorization(&cred(), &s),
            "OSS testAccessKeyId:cCmKr/ItKHaVeZErJTMAW9DlGc0="
        );
        Ok(())
    }

    #[test]
    fn test_fixed_headers_fill_their_lines() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        let s = string_to_sign(&Method::PUT, &headers, "/bucket/object")?;
        assert_eq!(s, "PUT\n\ntext/plain\n\n/bucket/object");

        headers.insert(CONTENT_MD5, "kAFQmDzST7DWlj99KOF/cg==".parse().unwrap());
        headers.insert(DATE, "Mon, 20 Jan 2014 06:38:31 GMT".parse().unwrap());
        let s = string_to_sign(&Method::PUT, &headers, "/bucket/object")?;
        assert_eq!(
            s,
            "PUT\nkAFQmDzST7DWlj99KOF/cg==\ntext/plain\nMon, 20 Jan 2014 06:38:31 GMT\n/bucket/object"
        );
        Ok(())
    }

    #[test]
    fn test_header_order_does_not_matter() -> Result<()> {
        let mut a = HeaderMap::new();
        a.insert("x-oss-meta-a", "1".parse().unwrap());
        a.insert("x-oss-meta-b", "2".parse().unwrap());
        a.insert(DATE, "Mon, 20 Jan 2014 06:38:31 GMT".parse().unwrap());

        let mut b = HeaderMap::new();
        b.insert(DATE, "Mon, 20 Jan 2014 06:38:31 GMT".parse().unwrap());
        b.insert("x-oss-meta-b", "2".parse().unwrap());
        b.insert("x-oss-meta-a", "1".parse().unwrap());

        let sa = string_to_sign(&Method::PUT, &a, "/bucket/object")?;
        let sb = string_to_sign(&Method::PUT, &b, "/bucket/object")?;
        assert_eq!(sa, sb);
        assert!(sa.contains("x-oss-meta-a:1\nx-oss-meta-b:2"));
        Ok(())
    }

    #[test]
    fn test_header_names_collapse_to_lowercase() -> Result<()> {
        let name: http::header::HeaderName = "x-oss-Meta-Foo".parse().unwrap();
        let mut a = HeaderMap::new();
        a.insert(name, "v".parse().unwrap());
        a.insert(DATE, "Mon, 20 Jan 2014 06:38:31 GMT".parse().unwrap());

        let mut b = HeaderMap::new();
        b.insert("x-oss-meta-foo", "v".parse().unwrap());
        b.insert(DATE, "Mon, 20 Jan 2014 06:38:31 GMT".parse().unwrap());

        assert_eq!(
            string_to_sign(&Method::GET, &a, "/bucket/")?,
            string_to_sign(&Method::GET, &b, "/bucket/")?
        );
        Ok(())
    }

    #[test]
    fn test_any_name_containing_x_oss_participates() -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert("some-x-oss-flag", "1".parse().unwrap());
        headers.insert("x-other", "skipped".parse().unwrap());

        let s = string_to_sign(&Method::GET, &headers, "/")?;
        assert!(s.contains("some-x-oss-flag:1"));
        assert!(!s.contains("x-other"));
        Ok(())
    }
}

use cookiemonster::base::encoding::b64url_encode;
use cookiemonster::base::hashing::HashAlgorithm;
use cookiemonster::codecs::jwt;
use cookiemonster::monster::Cookie;
use cookiemonster::CodecKind;

const HEADER_AND_BODY: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI0MiJ9";

fn jwt_with_signature_len(len: usize) -> String {
    format!("{HEADER_AND_BODY}.{}", b64url_encode(&vec![0xab; len]))
}

#[test]
fn test_signature_length_selects_algorithm() {
    let expected = [
        (20, HashAlgorithm::Sha1),
        (32, HashAlgorithm::Sha256),
        (48, HashAlgorithm::Sha384),
        (64, HashAlgorithm::Sha512),
    ];
    for (len, algorithm) in expected {
        let parsed = jwt::decode(&jwt_with_signature_len(len)).unwrap();
        assert_eq!(parsed.algorithm, algorithm);
    }
}

#[test]
fn test_other_signature_lengths_never_match() {
    for len in [1, 16, 19, 21, 28, 31, 33, 47, 49, 63, 65, 128] {
        assert!(jwt::decode(&jwt_with_signature_len(len)).is_none(), "len {len}");
    }
}

#[test]
fn test_decode_is_idempotent() {
    let raw = "eyJjc3JmX3Rva2VuIjoiYjAxNDZjZGIzZGZiMTliYWM1N2EyNGU5M2U2YWVhNDdhOTNlNzVlZiJ9.YYN0SA.B5roVjMHOW3IYSrohS9FhgCFlHk";
    let mut cookie = Cookie::new(raw);
    assert!(cookie.decode());
    let first = cookie.matched_codecs();
    let description = cookie.debug_description();

    assert!(cookie.decode());
    assert_eq!(cookie.matched_codecs(), first);
    assert_eq!(cookie.debug_description(), description);
    assert_eq!(cookie.raw(), raw);
}

#[test]
fn test_matches_are_reported_in_decode_order() {
    let raw = "eyJjc3JmX3Rva2VuIjoiYjAxNDZjZGIzZGZiMTliYWM1N2EyNGU5M2U2YWVhNDdhOTNlNzVlZiJ9.YYN0SA.B5roVjMHOW3IYSrohS9FhgCFlHk";
    let mut cookie = Cookie::new(raw);
    cookie.decode();

    let matched = cookie.matched_codecs();
    assert_eq!(
        matched,
        vec![CodecKind::Flask, CodecKind::ItsDangerous, CodecKind::Jwt]
    );

    let out = cookie.to_string();
    let flask = out.find("Decoder flask reports:").unwrap();
    let jwt = out.find("Decoder jwt reports:").unwrap();
    assert!(flask < jwt);
}

#[test]
fn test_url_encoded_cookie_is_unwrapped() {
    let mut cookie = Cookie::new("eyJ1c2VyIjoiYWRtaW4ifQ%3A1qZk3A%3AL1e5Am4mNEPLAis_HCqoRBcFWq8");
    assert!(cookie.decode());
    assert_eq!(cookie.raw(), "eyJ1c2VyIjoiYWRtaW4ifQ:1qZk3A:L1e5Am4mNEPLAis_HCqoRBcFWq8");
    assert_eq!(cookie.matched_codecs(), vec![CodecKind::Django]);
}

#[test]
fn test_short_and_garbage_input() {
    for raw in ["", "a.b.c", "garbage:garbage:garbage", "%zz%zz%zz%zz"] {
        let mut cookie = Cookie::new(raw);
        assert!(!cookie.decode(), "{raw:?} should not decode");
        assert!(cookie.result().is_none());
    }
}

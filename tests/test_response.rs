use porter::http::response::{Outcome, ReplyError, reason_phrase};

#[test]
fn test_reason_phrase_common_codes() {
    assert_eq!(reason_phrase(200), Some("OK"));
    assert_eq!(reason_phrase(201), Some("Created"));
    assert_eq!(reason_phrase(204), Some("No Content"));
    assert_eq!(reason_phrase(400), Some("Bad Request"));
    assert_eq!(reason_phrase(404), Some("Not Found"));
    assert_eq!(reason_phrase(405), Some("Method Not Allowed"));
    assert_eq!(reason_phrase(500), Some("Internal Server Error"));
    assert_eq!(reason_phrase(503), Some("Service Unavailable"));
}

#[test]
fn test_reason_phrase_unknown_codes() {
    assert_eq!(reason_phrase(299), None);
    assert_eq!(reason_phrase(600), None);
    assert_eq!(reason_phrase(0), None);
}

#[test]
fn test_unsupported_status_display() {
    let err = ReplyError::UnsupportedStatus(299);

    assert_eq!(err.to_string(), "no reason phrase for status code 299");
}

#[test]
fn test_outcome_reply_constructor() {
    let outcome = Outcome::reply(200, "hello");

    match outcome {
        Outcome::Reply {
            status,
            headers,
            body,
        } => {
            assert_eq!(status, 200);
            assert!(headers.is_empty());
            assert_eq!(body, b"hello".to_vec());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_outcome_reply_with_headers() {
    let outcome = Outcome::reply_with_headers(
        201,
        vec![("Content-Type".to_string(), "text/plain".to_string())],
        b"created".to_vec(),
    );

    match outcome {
        Outcome::Reply {
            status, headers, ..
        } => {
            assert_eq!(status, 201);
            assert_eq!(headers[0].0, "Content-Type");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

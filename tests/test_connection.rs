use porter::http::connection::{ConnState, ProtocolEvent, RequestMachine, Step};
use porter::http::request::{Method, PushHandle};

fn request_line(method: Method, target: &str) -> ProtocolEvent {
    ProtocolEvent::RequestLine {
        method,
        target: target.to_string(),
        version: (1, 1),
    }
}

fn header(name: &str, value: &str) -> ProtocolEvent {
    ProtocolEvent::Header {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn test_simple_get_reaches_dispatch() {
    let mut machine = RequestMachine::new();
    assert_eq!(machine.state(), ConnState::AwaitRequestLine);

    assert_eq!(
        machine.on_event(request_line(Method::Get, "/home?x=1")),
        Step::Continue
    );
    assert_eq!(machine.state(), ConnState::AwaitHeaders);

    assert_eq!(machine.on_event(header("Host", "localhost")), Step::Continue);
    assert_eq!(machine.on_event(ProtocolEvent::EndOfHeaders), Step::Dispatch);
    assert_eq!(machine.state(), ConnState::Dispatch);

    let req = machine.take_request(PushHandle::detached()).unwrap();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.path, "/home");
    assert_eq!(req.query, "x=1");
    assert_eq!(req.version, (1, 1));
    assert!(req.body.is_empty());
}

#[test]
fn test_content_length_triggers_body_read() {
    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Post, "/upload"));
    machine.on_event(header("Content-Length", "4"));

    assert_eq!(
        machine.on_event(ProtocolEvent::EndOfHeaders),
        Step::ReadBody(4)
    );
    assert_eq!(machine.state(), ConnState::ReadBody);

    assert_eq!(machine.body_complete(b"abcd".to_vec()), Step::Dispatch);

    let req = machine.take_request(PushHandle::detached()).unwrap();
    assert_eq!(req.body, b"abcd".to_vec());
}

#[test]
fn test_zero_and_negative_content_length_skip_body() {
    for value in ["0", "-5"] {
        let mut machine = RequestMachine::new();
        machine.on_event(request_line(Method::Post, "/upload"));
        machine.on_event(header("Content-Length", value));

        assert_eq!(machine.on_event(ProtocolEvent::EndOfHeaders), Step::Dispatch);

        let req = machine.take_request(PushHandle::detached()).unwrap();
        assert!(req.body.is_empty());
    }
}

#[test]
fn test_unparsable_content_length_closes() {
    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Post, "/upload"));
    machine.on_event(header("Content-Length", "four"));

    assert_eq!(machine.on_event(ProtocolEvent::EndOfHeaders), Step::Close);
    assert_eq!(machine.state(), ConnState::Closed);
}

#[test]
fn test_lowercase_content_length_is_ignored() {
    // Exact-case lookup policy: a differently-cased header means no body
    // is read.
    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Post, "/upload"));
    machine.on_event(header("content-length", "4"));

    assert_eq!(machine.on_event(ProtocolEvent::EndOfHeaders), Step::Dispatch);
}

#[test]
fn test_headers_keep_arrival_order_with_duplicates() {
    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Get, "/"));
    machine.on_event(header("A", "1"));
    machine.on_event(header("B", "2"));
    machine.on_event(header("A", "3"));
    machine.on_event(ProtocolEvent::EndOfHeaders);

    let req = machine.take_request(PushHandle::detached()).unwrap();
    let names: Vec<&str> = req.headers.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "A"]);
}

#[test]
fn test_error_line_closes_in_any_state() {
    let mut machine = RequestMachine::new();
    assert_eq!(
        machine.on_event(ProtocolEvent::ErrorLine("junk".to_string())),
        Step::Close
    );

    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Get, "/"));
    assert_eq!(
        machine.on_event(ProtocolEvent::ErrorLine("junk".to_string())),
        Step::Close
    );
}

#[test]
fn test_peer_closed_closes() {
    let mut machine = RequestMachine::new();

    assert_eq!(machine.on_event(ProtocolEvent::PeerClosed), Step::Close);
    assert_eq!(machine.state(), ConnState::Closed);
}

#[test]
fn test_unexpected_event_closes_defensively() {
    // End-of-headers before any request line makes no sense; the
    // connection is torn down, not the process.
    let mut machine = RequestMachine::new();

    assert_eq!(machine.on_event(ProtocolEvent::EndOfHeaders), Step::Close);
}

#[test]
fn test_bad_target_closes() {
    let mut machine = RequestMachine::new();

    assert_eq!(
        machine.on_event(request_line(Method::Get, "foo")),
        Step::Close
    );
}

#[test]
fn test_asterisk_target() {
    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Options, "*"));
    machine.on_event(ProtocolEvent::EndOfHeaders);

    let req = machine.take_request(PushHandle::detached()).unwrap();
    assert_eq!(req.path, "*");
    assert_eq!(req.query, "");
}

#[test]
fn test_absolute_uri_target() {
    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Get, "http://example.com/a/b?x=1"));
    machine.on_event(ProtocolEvent::EndOfHeaders);

    let req = machine.take_request(PushHandle::detached()).unwrap();
    assert_eq!(req.path, "/a/b");
    assert_eq!(req.query, "x=1");
}

#[test]
fn test_unknown_method_normalized_at_dispatch() {
    let mut machine = RequestMachine::new();
    machine.on_event(request_line(Method::Other("BREW".to_string()), "/"));
    machine.on_event(ProtocolEvent::EndOfHeaders);

    let req = machine.take_request(PushHandle::detached()).unwrap();
    assert_eq!(req.method, Method::Other("brew".to_string()));
}

#[test]
fn test_take_request_outside_dispatch_state() {
    let mut machine = RequestMachine::new();

    assert!(machine.take_request(PushHandle::detached()).is_none());
}

#[test]
fn test_push_handle_clones_share_one_slot() {
    // The exactly-once delivery against a live connection is covered by
    // the end-to-end server tests; here only the slot sharing.
    let handle = PushHandle::detached();
    let clone = handle.clone();

    assert!(!handle.push(b"one".to_vec()));
    assert!(!clone.push(b"two".to_vec()));
}

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nestview::entities::{NestingRequest, RequestError, Session};
use nestview_client::{
    ClientError, DEFAULT_ENDPOINT, NestClient, Transport, TransportError, TransportResponse,
};
use serde_json::Value;
use test_case::test_case;
use tokio::sync::Notify;

/// Transport answering every call with the same response, optionally holding each call
/// until the gate is opened.
struct FakeTransport {
    calls: AtomicUsize,
    last_body: std::sync::Mutex<Option<String>>,
    gate: Option<Arc<Notify>>,
    response: Result<TransportResponse, String>,
}

impl FakeTransport {
    fn answering(status: u16, reason: &str, body: &str) -> Self {
        FakeTransport {
            calls: AtomicUsize::new(0),
            last_body: std::sync::Mutex::new(None),
            gate: None,
            response: Ok(TransportResponse {
                status,
                reason: reason.to_string(),
                body: body.to_string(),
            }),
        }
    }

    fn failing(message: &str) -> Self {
        FakeTransport {
            response: Err(message.to_string()),
            ..FakeTransport::answering(0, "", "")
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    fn post_json(
        &self,
        _url: &str,
        body: String,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_body.lock().unwrap() = Some(body);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.response.clone().map_err(TransportError::Other)
        }
    }
}

const RESPONSE: &str = r#"{
    "summary": {"total_bins": 1, "total_pieces_placed": 1, "average_efficiency": 5.0,
                "total_execution_time": 0.01},
    "bins": [{"bin_id": 1, "bin_width": 200, "bin_height": 150, "material_efficiency": 5.0,
              "execution_time": 0.01,
              "placed_pieces": [{"id": "rectangle_1_1", "original_id": "rectangle_1",
                                 "copy_number": 1, "points": [[0, 0], [50, 0], [50, 30], [0, 30]]}]}]
}"#;

fn client(transport: FakeTransport) -> NestClient<FakeTransport> {
    NestClient::with_transport(transport, DEFAULT_ENDPOINT)
}

fn request() -> NestingRequest {
    Session::sample().build_request()
}

#[tokio::test]
async fn successful_submission_sends_the_request_body() {
    let client = client(FakeTransport::answering(200, "OK", RESPONSE));
    let result = client.submit(&request()).await.unwrap();
    assert_eq!(result.summary.total_pieces_placed, 1);
    assert_eq!(result.bins[0].placed_pieces[0].original_id, "rectangle_1");

    let sent = client.transport().last_body.lock().unwrap().clone().unwrap();
    let sent: Value = serde_json::from_str(&sent).unwrap();
    assert_eq!(sent["pieces"].as_array().unwrap().len(), 4);
    assert_eq!(sent["strategy"], "bottom_left");
    assert_eq!(sent["unit"], "mm");
}

#[tokio::test]
async fn two_rapid_submissions_make_one_call() {
    let _ = env_logger::builder().is_test(true).try_init();
    let gate = Arc::new(Notify::new());
    let transport = FakeTransport::answering(200, "OK", RESPONSE).gated(gate.clone());
    let client = client(transport);
    let request = request();

    let first = client.submit_guarded(&request);
    let second = async {
        tokio::task::yield_now().await;
        let outcome = client.submit_guarded(&request).await;
        gate.notify_one();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(matches!(second, Err(ClientError::Busy)));
    assert_eq!(client.transport().calls(), 1);
    assert!(!client.guard().is_busy());
}

#[tokio::test]
async fn guard_is_released_after_a_failure() {
    let client = client(FakeTransport::failing("connection refused"));
    let request = request();
    assert!(matches!(
        client.submit_guarded(&request).await,
        Err(ClientError::Transport(TransportError::Other(_)))
    ));
    assert!(!client.guard().is_busy());
    assert!(client.submit_guarded(&request).await.is_err());
    assert_eq!(client.transport().calls(), 2);
}

#[test_case(500, "Internal Server Error"; "server error")]
#[test_case(404, "Not Found"; "wrong endpoint")]
#[test_case(422, "Unprocessable Entity"; "rejected body")]
#[tokio::test]
async fn non_success_statuses_are_reported(status: u16, reason: &str) {
    let client = client(FakeTransport::answering(status, reason, "{}"));
    let error = client.submit(&request()).await.unwrap_err();
    assert_eq!(error.to_string(), format!("Error {status}: {reason}"));
}

#[tokio::test]
async fn unreadable_bodies_are_decode_errors() {
    let client = client(FakeTransport::answering(200, "OK", "<html>"));
    assert!(matches!(
        client.submit(&request()).await,
        Err(ClientError::Decode(_))
    ));
}

#[tokio::test]
async fn empty_requests_are_not_sent() {
    let client = client(FakeTransport::answering(200, "OK", RESPONSE));
    let request = Session::default().build_request();
    assert!(matches!(
        client.submit(&request).await,
        Err(ClientError::Request(RequestError::NoPieces))
    ));
    assert_eq!(client.transport().calls(), 0);
}

#[tokio::test]
async fn results_of_a_changed_session_are_discarded() {
    let client = client(FakeTransport::answering(200, "OK", RESPONSE));
    let mut session = Session::sample();

    let token = session.request_token();
    let result = client.submit_guarded(&session.build_request()).await.unwrap();
    session.clear_pieces();
    assert!(!session.apply_result(token, result));

    session.replace_with(Session::sample()).unwrap();
    let token = session.request_token();
    let result = client.submit_guarded(&session.build_request()).await.unwrap();
    assert!(session.apply_result(token, result));
    assert!(session.result().is_some());
}

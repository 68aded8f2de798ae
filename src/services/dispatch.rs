//! Worksheet dispatch - mail the table to the selected recipients
//!
//! One multipart POST to `{backend}/csv?receiver=a@x,b@y` with the
//! serialized worksheet as the `file` field. Exactly one attempt is made;
//! retry policy belongs to the caller.

use crate::model::recipient::Recipient;
use crate::model::table::Worksheet;
use crate::services::fetch::backend_url;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

pub const ATTACHMENT_NAME: &str = "exported_data.csv";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no recipients selected")]
    NoRecipientsSelected,
    #[error("the worksheet is empty")]
    EmptyWorksheet,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend rejected the worksheet ({status}): {body}")]
    RemoteRejected { status: StatusCode, body: String },
}

/// Acknowledgement of an accepted dispatch
#[derive(Debug, PartialEq)]
pub enum DispatchAck {
    /// The backend answered with a JSON body
    Json(serde_json::Value),
    /// Accepted, but the body was not parseable as JSON
    Accepted,
}

/// Send the worksheet to the given recipients.
///
/// Preconditions are checked before any serialization or I/O, so a failed
/// precondition is guaranteed to leave no trace on the wire.
pub fn send(
    client: &Client,
    backend: &str,
    worksheet: &Worksheet,
    recipients: &[Recipient],
) -> Result<DispatchAck, DispatchError> {
    if recipients.is_empty() {
        return Err(DispatchError::NoRecipientsSelected);
    }
    if worksheet.is_empty() {
        return Err(DispatchError::EmptyWorksheet);
    }

    let receiver = recipients
        .iter()
        .map(|r| r.email.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let file = Part::text(worksheet.serialize())
        .file_name(ATTACHMENT_NAME)
        .mime_str("text/csv")?;
    let form = Form::new().part("file", file);

    let response = client
        .post(backend_url(backend, "csv"))
        .query(&[("receiver", receiver.as_str())])
        .multipart(form)
        .send()?;

    let status = response.status();
    let body = response.text().unwrap_or_default();

    if !status.is_success() {
        return Err(DispatchError::RemoteRejected { status, body });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(DispatchAck::Json(value)),
        Err(_) => Ok(DispatchAck::Accepted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::CanonicalRow;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn recipient(email: &str) -> Recipient {
        Recipient {
            name: "Test".to_string(),
            email: email.to_string(),
            selected: true,
        }
    }

    fn one_row_worksheet() -> Worksheet {
        let mut ws = Worksheet::new();
        ws.load(vec![CanonicalRow {
            date: "2025-04-28".to_string(),
            author_name: "Jane".to_string(),
            commit_type: "feat".to_string(),
            scope: "api".to_string(),
            description: "work".to_string(),
            time_stamp: "8h".to_string(),
        }]);
        ws
    }

    #[test]
    fn test_preconditions_checked_before_any_network_io() {
        // The backend address is unroutable; reaching it would error with
        // Transport, so getting the precondition variants back proves no
        // request was attempted.
        let client = Client::new();

        let err = send(&client, "http://127.0.0.1:1", &one_row_worksheet(), &[]).unwrap_err();
        assert!(matches!(err, DispatchError::NoRecipientsSelected));

        let err = send(
            &client,
            "http://127.0.0.1:1",
            &Worksheet::new(),
            &[recipient("a@x.com")],
        )
        .unwrap_err();
        assert!(matches!(err, DispatchError::EmptyWorksheet));
    }

    #[tokio::test]
    async fn test_send_posts_multipart_with_receiver_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/csv"))
            .and(query_param("receiver", "a@x.com,b@y.org"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let ack = tokio::task::spawn_blocking(move || {
            let client = Client::new();
            send(
                &client,
                &base,
                &one_row_worksheet(),
                &[recipient("a@x.com"), recipient("b@y.org")],
            )
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(ack, DispatchAck::Json(json!({"success": true})));
    }

    #[tokio::test]
    async fn test_send_accepts_non_json_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let base = server.uri();
        let ack = tokio::task::spawn_blocking(move || {
            let client = Client::new();
            send(&client, &base, &one_row_worksheet(), &[recipient("a@x.com")])
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(ack, DispatchAck::Accepted);
    }

    #[tokio::test]
    async fn test_send_reports_rejection_with_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/csv"))
            .respond_with(ResponseTemplate::new(500).set_body_string("smtp unavailable"))
            .mount(&server)
            .await;

        let base = server.uri();
        let err = tokio::task::spawn_blocking(move || {
            let client = Client::new();
            send(&client, &base, &one_row_worksheet(), &[recipient("a@x.com")])
        })
        .await
        .unwrap()
        .unwrap_err();

        match err {
            DispatchError::RemoteRejected { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "smtp unavailable");
            }
            other => panic!("expected RemoteRejected, got {:?}", other),
        }
    }
}

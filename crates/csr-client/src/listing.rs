use csr_protocol::{endpoints, HttpResponse, ProtocolResult, RecordList, Transport};

use crate::markup::TableRow;
use crate::messages;
use crate::render::Rendered;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingOutcome {
    Loaded(RecordList),
    Failed { message: String },
}

impl ListingOutcome {
    pub fn interpret(result: ProtocolResult<HttpResponse>) -> Self {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "records request failed");
                return Self::failed(None);
            }
        };
        tracing::debug!(status = resp.status, "records response");
        if resp.status != 200 {
            tracing::warn!(status = resp.status, "unexpected records status");
            return Self::failed(resp.error_message());
        }
        match resp.json::<RecordList>() {
            Ok(list) => Self::Loaded(list),
            Err(e) => {
                tracing::warn!(error = %e, "undecodable records body");
                Self::failed(None)
            }
        }
    }

    fn failed(message: Option<String>) -> Self {
        Self::Failed { message: message.unwrap_or_else(|| messages::LIST_FAILED.to_string()) }
    }

    /// Escaped rows in server order; `None` when the table must be left as is.
    pub fn rows(&self) -> Option<Vec<TableRow>> {
        match self {
            Self::Loaded(list) => Some(list.items.iter().map(TableRow::from_record).collect()),
            Self::Failed { .. } => None,
        }
    }

    pub fn rendered(&self) -> Rendered {
        match self {
            Self::Loaded(list) => Rendered::ok(messages::record_count(list.count)),
            Self::Failed { message } => Rendered::ng(message.clone()),
        }
    }
}

pub async fn fetch<T: Transport + ?Sized>(transport: &T) -> ListingOutcome {
    ListingOutcome::interpret(transport.get(endpoints::RECORDS).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Tone;
    use crate::testkit::ScriptedTransport;

    const TWO_RECORDS: &str = r#"{"count":2,"items":[
        {"index":1,"timestamp_utc":"2024-01-01T00:00:00Z","name":"a","version":"1",
         "sha256":"aa","file_size_bytes":3,"original_filename":"a.bin","signing_key_id":"k1"},
        {"index":2,"timestamp_utc":"2024-01-02T00:00:00Z","name":"b","version":"2",
         "sha256":"bb","file_size_bytes":4,"original_filename":"<img src=x onerror=alert(1)>",
         "signing_key_id":null}
    ]}"#;

    async fn list_with(status: u16, body: &str) -> ListingOutcome {
        let t = ScriptedTransport::default();
        t.reply("GET", endpoints::RECORDS, status, body);
        fetch(&t).await
    }

    #[tokio::test]
    async fn loaded_rows_keep_server_order() {
        let outcome = list_with(200, TWO_RECORDS).await;
        let rows = outcome.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells()[0], "1");
        assert_eq!(rows[1].cells()[0], "2");
        assert_eq!(outcome.rendered(), Rendered::ok("件数: 2"));
    }

    #[tokio::test]
    async fn loaded_rows_are_escaped() {
        let rows = list_with(200, TWO_RECORDS).await.rows().unwrap();
        assert_eq!(rows[1].cells()[6], "&lt;img src=x onerror=alert(1)&gt;");
        assert_eq!(rows[1].cells()[7], "");
    }

    #[tokio::test]
    async fn empty_registry() {
        let outcome = list_with(200, r#"{"count":0,"items":[]}"#).await;
        assert_eq!(outcome.rows(), Some(Vec::new()));
        assert_eq!(outcome.rendered().text, "件数: 0");
    }

    #[tokio::test]
    async fn non_200_keeps_table() {
        let outcome = list_with(500, r#"{"error":{"message":"db down"}}"#).await;
        assert!(outcome.rows().is_none());
        assert_eq!(outcome.rendered(), Rendered::ng("db down"));
    }

    #[tokio::test]
    async fn malformed_body_is_failure() {
        let outcome = list_with(200, r#"{"items":"nope"}"#).await;
        assert_eq!(outcome.rendered(), Rendered::ng(messages::LIST_FAILED));
    }

    #[tokio::test]
    async fn transport_failure() {
        let t = ScriptedTransport::default();
        let outcome = fetch(&t).await;
        assert!(outcome.rows().is_none());
        assert_eq!(outcome.rendered().tone, Tone::Ng);
    }
}

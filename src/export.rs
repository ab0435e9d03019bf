//! Streaming consumption of NDJSON export downloads.
//!
//! Export endpoints answer with newline-delimited JSON: one record per line,
//! potentially far larger than what should sit in memory at once. The stream
//! here parses and yields records incrementally off the open response body
//! instead of buffering the whole download.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio_util::io::StreamReader;

use crate::error::{InfrakitError, Result};

type BodyReader = BufReader<StreamReader<BoxStream<'static, std::io::Result<Bytes>>, Bytes>>;

/// A lazy, finite, forward-only sequence of export records.
///
/// Each line of the response body is parsed as one JSON record and yielded
/// as soon as it arrives; blank lines are skipped. The underlying HTTP
/// connection lives exactly as long as this value: dropping the stream
/// (early termination included) or hitting an error releases it.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use serde_json::Value;
///
/// # async fn example(mut stream: infrakit::ExportStream<Value>) -> infrakit::Result<()> {
/// while let Some(record) = stream.next().await {
///     println!("{}", record?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ExportStream<T> {
    lines: Lines<BodyReader>,
    // fn() -> T keeps the stream Unpin for any record type.
    _record: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for ExportStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportStream").finish_non_exhaustive()
    }
}

impl<T> ExportStream<T> {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        let body = response
            .bytes_stream()
            .map_err(std::io::Error::other)
            .boxed();
        let lines = BufReader::new(StreamReader::new(body)).lines();
        Self {
            lines,
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Stream for ExportStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.lines).poll_next_line(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(None)) => return Poll::Ready(None),
                Poll::Ready(Ok(Some(line))) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Poll::Ready(Some(parse_record(&line)));
                }
                Poll::Ready(Err(e)) => return Poll::Ready(Some(Err(InfrakitError::IoError(e)))),
            }
        }
    }
}

fn parse_record<T: DeserializeOwned>(line: &str) -> Result<T> {
    serde_json::from_str(line).map_err(|source| InfrakitError::MalformedResponse {
        body: line.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_stream_is_unpin_for_any_record_type() {
        fn assert_unpin<S: Unpin>() {}
        assert_unpin::<ExportStream<std::marker::PhantomPinned>>();
    }

    #[test]
    fn test_parse_record_rejects_non_json_line() {
        let err = parse_record::<Value>("not json").unwrap_err();
        assert!(matches!(
            err,
            InfrakitError::MalformedResponse { ref body, .. } if body == "not json"
        ));
    }
}

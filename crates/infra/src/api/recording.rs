//! Streamed call recording

use ats2_domain::{Ats2Error, Result};
use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};

/// A recording file as a named byte stream.
///
/// The stream is consumed once, either piped through [`Self::into_stream`] or
/// collected with [`Self::into_bytes`].
pub struct RecordingFile {
    filename: String,
    stream: BoxStream<'static, Result<Bytes>>,
}

impl RecordingFile {
    pub fn new<S>(filename: impl Into<String>, stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes>> + Send + 'static,
    {
        Self { filename: filename.into(), stream: stream.boxed() }
    }

    /// Wrap a reqwest body stream; chunk errors become client errors.
    pub(crate) fn from_response(filename: impl Into<String>, response: reqwest::Response) -> Self {
        let stream = response
            .bytes_stream()
            .map_err(|err| Ats2Error::client(format!("Recording stream failed: {err}")));
        Self::new(filename, stream)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes>> {
        self.stream
    }

    /// Concatenate every chunk in arrival order.
    ///
    /// Resolves once the stream ends; the first stream error is returned
    /// instead of a partial buffer.
    pub async fn into_bytes(self) -> Result<Bytes> {
        let mut buffer = BytesMut::new();
        let mut stream = self.stream;
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl std::fmt::Debug for RecordingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingFile").field("filename", &self.filename).finish_non_exhaustive()
    }
}

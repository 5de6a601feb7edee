//! Fully buffered response body.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};

/// Body of every bucketd response.
///
/// bucketd reads objects into memory before answering, so a body is a
/// single chunk sent in one frame, or nothing at all.
#[derive(Debug, Default)]
pub struct ResponseBody {
    chunk: Option<Bytes>,
}

impl ResponseBody {
    /// A body carrying `data` (object bytes, error XML or plain text).
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            chunk: (!data.is_empty()).then_some(data),
        }
    }

    /// A body with no content, for 204 and header-only responses.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Body for ResponseBody {
    type Data = Bytes;
    type Error = std::convert::Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().chunk.take().map(|data| Ok(Frame::data(data))))
    }

    fn is_end_stream(&self) -> bool {
        self.chunk.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        let len = self.chunk.as_ref().map_or(0, Bytes::len);
        SizeHint::with_exact(len as u64)
    }
}

//! Response construction: success responses and S3 error XML.

use std::io;

use bucketd_store::ObjectMetadata;
use bytes::Bytes;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::body::ResponseBody;
use crate::error::ApiError;

/// `200 OK` for a created bucket, with its `Location`.
#[must_use]
pub fn create_bucket_response(bucket: &str) -> http::Response<ResponseBody> {
    build_response(
        http::Response::builder()
            .status(http::StatusCode::OK)
            .header(http::header::LOCATION, format!("/{bucket}")),
        ResponseBody::empty(),
    )
}

/// `200 OK` with no body for a stored object.
#[must_use]
pub fn put_object_response() -> http::Response<ResponseBody> {
    build_response(
        http::Response::builder().status(http::StatusCode::OK),
        ResponseBody::empty(),
    )
}

/// `200 OK` carrying the object body.
#[must_use]
pub fn get_object_response(body: Bytes, metadata: &ObjectMetadata) -> http::Response<ResponseBody> {
    let mut builder = http::Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "application/octet-stream")
        .header(http::header::CONTENT_LENGTH, body.len());

    if let Some(last_modified) = metadata.last_modified_at() {
        builder = builder.header(
            http::header::LAST_MODIFIED,
            last_modified
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string(),
        );
    }

    build_response(builder, ResponseBody::from_bytes(body))
}

/// `204 No Content` for a deleted object.
#[must_use]
pub fn delete_object_response() -> http::Response<ResponseBody> {
    build_response(
        http::Response::builder().status(http::StatusCode::NO_CONTENT),
        ResponseBody::empty(),
    )
}

/// Convert an [`ApiError`] into an HTTP error response with an XML body.
#[must_use]
pub fn error_to_response(err: &ApiError, request_id: &str) -> http::Response<ResponseBody> {
    let xml = error_to_xml(err.code, &err.message, request_id);
    build_response(
        http::Response::builder()
            .status(err.status)
            .header(http::header::CONTENT_TYPE, "application/xml"),
        ResponseBody::from_bytes(xml),
    )
}

/// Finish a builder, falling back to a bare 500 if a header was invalid.
fn build_response(
    builder: http::response::Builder,
    body: ResponseBody,
) -> http::Response<ResponseBody> {
    builder.body(body).unwrap_or_else(|_| {
        http::Response::builder()
            .status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .body(ResponseBody::empty())
            .expect("static response should be valid")
    })
}

/// Format an S3 error document.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <Error>
///   <Code>NoSuchBucket</Code>
///   <Message>requested bucket does not exist</Message>
///   <RequestId>4f1c...</RequestId>
/// </Error>
/// ```
#[must_use]
pub fn error_to_xml(code: &str, message: &str, request_id: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);
    if let Err(e) = write_error_xml(&mut buf, code, message, request_id) {
        tracing::error!(error = %e, "failed to serialize error XML");
        buf.clear();
    }
    buf
}

fn write_error_xml(
    buf: &mut Vec<u8>,
    code: &str,
    message: &str,
    request_id: &str,
) -> io::Result<()> {
    let mut writer = Writer::new(buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.create_element("Error").write_inner_content(|w| {
        w.create_element("Code")
            .write_text_content(BytesText::new(code))?;
        w.create_element("Message")
            .write_text_content(BytesText::new(message))?;
        w.create_element("RequestId")
            .write_text_content(BytesText::new(request_id))?;
        Ok(())
    })?;

    Ok(())
}

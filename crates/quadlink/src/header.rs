// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service-side request header validation and response header stamping.
//!
//! A handler validates the incoming header on entry and finishes with one of
//! the `set_*` helpers, which set the common error code and the response
//! timestamp. Success-marking helpers return `true` and failure-marking
//! helpers return `false`, so a handler can end with
//! `return set_invalid_request(..)`.

use crate::api::{AnyMessage, CommonErrorCode, Request, Response, ResponseHeader};
use crate::strip::stripped_copy;
use crate::time::Clock;

/// Validate `request`'s header and pre-populate `response`'s.
///
/// Copies the request header and a receive timestamp into the response
/// header, embeds a stripped copy of the request when `reflect` is set, and
/// marks the response `Ok` or `InvalidRequest`. Returns true iff the
/// response carries `Ok`.
pub fn validate_request_header_and_respond<Req, Rsp>(
    request: &Req,
    reflect: bool,
    response: &mut Rsp,
    clock: &dyn Clock,
) -> bool
where
    Req: Request,
    Rsp: Response,
{
    let received = clock.now_timestamp();
    let header = response.header_mut().get_or_insert_with(ResponseHeader::default);
    header.request_received_timestamp = Some(received);
    if reflect {
        header.request = Some(AnyMessage::new(stripped_copy(request)));
    }

    let Some(request_header) = request.header() else {
        return set_invalid_request(response, "request header missing", clock);
    };
    header.request_header = Some(request_header.clone());

    let timestamp_valid = request_header
        .request_timestamp
        .is_some_and(|ts| ts.seconds >= 0 && ts.nanos >= 0);
    if !timestamp_valid {
        return set_invalid_request(response, "request_timestamp missing or negative", clock);
    }
    if request_header.client_name.is_empty() {
        return set_invalid_request(response, "client_name missing", clock);
    }

    header.error.code = CommonErrorCode::Ok;
    true
}

fn finish<Rsp: Response>(
    response: &mut Rsp,
    code: CommonErrorCode,
    message: String,
    clock: &dyn Clock,
) {
    let header = response.header_mut().get_or_insert_with(ResponseHeader::default);
    header.error.code = code;
    header.error.message = message;
    header.response_timestamp = Some(clock.now_timestamp());
}

pub fn set_ok<Rsp: Response>(response: &mut Rsp, clock: &dyn Clock) -> bool {
    finish(response, CommonErrorCode::Ok, String::new(), clock);
    true
}

pub fn set_invalid_request<Rsp: Response>(
    response: &mut Rsp,
    message: impl Into<String>,
    clock: &dyn Clock,
) -> bool {
    let message = message.into();
    log::debug!("[header] invalid request: {}", message);
    finish(response, CommonErrorCode::InvalidRequest, message, clock);
    false
}

pub fn set_internal_error<Rsp: Response>(
    response: &mut Rsp,
    message: impl Into<String>,
    clock: &dyn Clock,
) -> bool {
    let message = message.into();
    log::warn!("[header] internal error: {}", message);
    finish(response, CommonErrorCode::InternalServerError, message, clock);
    false
}

/// Promote an `Unspecified` code to `Ok`, keeping any failure already set.
/// Returns true iff the response ends up `Ok`.
pub fn set_ok_if_not_error<Rsp: Response>(response: &mut Rsp, clock: &dyn Clock) -> bool {
    let header = response.header_mut().get_or_insert_with(ResponseHeader::default);
    if header.error.code == CommonErrorCode::Unspecified {
        header.error.code = CommonErrorCode::Ok;
    }
    header.response_timestamp = Some(clock.now_timestamp());
    header.error.code == CommonErrorCode::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::payload::{DataBlob, RecordDataBlobsRequest};
    use crate::api::power::{PowerCommandRequest, PowerCommandResponse};
    use crate::api::{RequestHeader, Timestamp};
    use crate::time::ManualClock;

    fn valid_request() -> PowerCommandRequest {
        PowerCommandRequest {
            header: Some(RequestHeader {
                request_timestamp: Some(Timestamp::new(5, 0)),
                client_name: "c".to_string(),
                disable_rpc_logging: false,
            }),
            ..Default::default()
        }
    }

    fn code(response: &PowerCommandResponse) -> CommonErrorCode {
        response.header.as_ref().map(|h| h.error.code).unwrap_or_default()
    }

    #[test]
    fn test_valid_header_is_ok() {
        let clock = ManualClock::new(7_000_000_000);
        let mut response = PowerCommandResponse::default();
        assert!(validate_request_header_and_respond(&valid_request(), false, &mut response, &clock));

        let header = response.header.as_ref().unwrap();
        assert_eq!(header.error.code, CommonErrorCode::Ok);
        assert_eq!(header.request_received_timestamp, Some(Timestamp::new(7, 0)));
        assert_eq!(header.request_header.as_ref().unwrap().client_name, "c");
        assert!(header.request.is_none());
    }

    #[test]
    fn test_missing_timestamp_is_invalid() {
        let clock = ManualClock::new(1_000_000_000);
        let mut request = valid_request();
        request.header.as_mut().unwrap().request_timestamp = None;
        let mut response = PowerCommandResponse::default();

        assert!(!validate_request_header_and_respond(&request, false, &mut response, &clock));
        let header = response.header.as_ref().unwrap();
        assert_eq!(header.error.code, CommonErrorCode::InvalidRequest);
        assert!(header.response_timestamp.is_some());
        assert!(header.request_received_timestamp.is_some());
    }

    #[test]
    fn test_missing_header_and_bad_fields() {
        let clock = ManualClock::new(0);
        let mut response = PowerCommandResponse::default();
        let bare = PowerCommandRequest::default();
        assert!(!validate_request_header_and_respond(&bare, true, &mut response, &clock));
        let header = response.header.as_ref().unwrap();
        assert_eq!(header.error.code, CommonErrorCode::InvalidRequest);
        assert!(header.request.is_some());

        let mut negative = valid_request();
        negative.header.as_mut().unwrap().request_timestamp = Some(Timestamp::new(1, -1));
        let mut response = PowerCommandResponse::default();
        assert!(!validate_request_header_and_respond(&negative, false, &mut response, &clock));

        let mut anonymous = valid_request();
        anonymous.header.as_mut().unwrap().client_name.clear();
        let mut response = PowerCommandResponse::default();
        assert!(!validate_request_header_and_respond(&anonymous, false, &mut response, &clock));
        assert_eq!(code(&response), CommonErrorCode::InvalidRequest);
    }

    #[test]
    fn test_reflected_request_is_stripped() {
        let clock = ManualClock::new(0);
        let request = RecordDataBlobsRequest {
            header: Some(RequestHeader {
                request_timestamp: Some(Timestamp::new(1, 0)),
                client_name: "logger".to_string(),
                disable_rpc_logging: false,
            }),
            blob_data: vec![DataBlob {
                data: vec![0u8; 64],
                ..Default::default()
            }],
        };
        let mut response = PowerCommandResponse::default();
        assert!(validate_request_header_and_respond(&request, true, &mut response, &clock));

        let reflected = response.header.as_ref().unwrap().request.as_ref().unwrap();
        let copy = reflected.downcast_ref::<RecordDataBlobsRequest>().unwrap();
        assert!(copy.blob_data[0].data.is_empty());
        assert_eq!(request.blob_data[0].data.len(), 64);
    }

    #[test]
    fn test_set_helpers() {
        let clock = ManualClock::new(3_000_000_000);
        let mut response = PowerCommandResponse::default();
        assert!(set_ok(&mut response, &clock));
        assert_eq!(
            response.header.as_ref().unwrap().response_timestamp,
            Some(Timestamp::new(3, 0))
        );

        assert!(!set_internal_error(&mut response, "boom", &clock));
        assert_eq!(code(&response), CommonErrorCode::InternalServerError);
        assert_eq!(response.header.as_ref().unwrap().error.message, "boom");
    }

    #[test]
    fn test_set_ok_if_not_error_is_idempotent() {
        let clock = ManualClock::new(0);
        let mut fresh = PowerCommandResponse::default();
        assert!(set_ok_if_not_error(&mut fresh, &clock));
        assert!(set_ok_if_not_error(&mut fresh, &clock));
        assert_eq!(code(&fresh), CommonErrorCode::Ok);

        let mut failed = PowerCommandResponse::default();
        set_invalid_request(&mut failed, "bad", &clock);
        assert!(!set_ok_if_not_error(&mut failed, &clock));
        assert!(!set_ok_if_not_error(&mut failed, &clock));
        assert_eq!(code(&failed), CommonErrorCode::InvalidRequest);
    }
}

use tonic::metadata::MetadataValue;
use tonic::{Request, Status};

/// Metadata key carrying the per-call correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Interceptor that guarantees every inbound call carries an `x-request-id`.
///
/// A non-empty id supplied by the caller is kept so logs can be correlated
/// across services; otherwise a UUID v4 is generated.
///
/// # Example
/// ```ignore
/// use grpc_server::RequestIdInterceptor;
/// use tonic::service::interceptor::InterceptedService;
///
/// let svc = InterceptedService::new(EmbeddingServiceServer::new(service), RequestIdInterceptor);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdInterceptor;

impl tonic::service::Interceptor for RequestIdInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let supplied = request
            .metadata()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| !value.trim().is_empty());

        if !supplied {
            let request_id = uuid::Uuid::new_v4().to_string();
            let value = MetadataValue::try_from(request_id.as_str())
                .map_err(|_| Status::internal("Failed to create request ID"))?;
            request.metadata_mut().insert(REQUEST_ID_HEADER, value);
        }

        tracing::trace!(request_id = %request_id(&request), "Inbound gRPC request");

        Ok(request)
    }
}

/// Read the request id set by [`RequestIdInterceptor`]; `"-"` when absent.
pub fn request_id<T>(request: &Request<T>) -> &str {
    request
        .metadata()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::service::Interceptor;

    #[test]
    fn test_generates_request_id_when_missing() {
        let mut interceptor = RequestIdInterceptor;
        let req = interceptor.call(Request::new(())).unwrap();
        let id = request_id(&req);
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_keeps_caller_request_id() {
        let mut interceptor = RequestIdInterceptor;
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(REQUEST_ID_HEADER, MetadataValue::from_static("abc-123"));

        let req = interceptor.call(request).unwrap();
        assert_eq!(request_id(&req), "abc-123");
    }

    #[test]
    fn test_replaces_blank_request_id() {
        let mut interceptor = RequestIdInterceptor;
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(REQUEST_ID_HEADER, MetadataValue::from_static("  "));

        let req = interceptor.call(request).unwrap();
        assert_ne!(request_id(&req).trim(), "");
    }

    #[test]
    fn test_request_id_absent_without_interceptor() {
        assert_eq!(request_id(&Request::new(())), "-");
    }
}

use actix_web::{
    dev::ServiceRequest,
    http::header::{HeaderName, ToStrError},
};

/// `Ok(None)` when the header is absent, an error when it is present but not
/// visible ASCII.
pub fn get_header<'a>(
    req: &'a ServiceRequest,
    header_name: &'static str,
) -> Result<Option<&'a str>, ToStrError> {
    req.headers()
        .get(HeaderName::from_static(header_name))
        .map(|value| value.to_str())
        .transpose()
}

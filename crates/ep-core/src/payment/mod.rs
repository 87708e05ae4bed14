//! Payment callback shapes.
//! 支付回调参数规范化
//!
//! Payment providers redirect back with one of two query shapes:
//!
//! - canonical: `?q=su|fu&data=...` on the subscription result path
//! - legacy:    `?esewa_status=success|failure&data=...` on any path
//!
//! Both normalize into a single [`PaymentCallback`], which is then
//! forwarded to the unified payment result path as `?status=..&data=..`.

use url::Url;

/// Path payment providers return to with the canonical shape.
pub const SUBSCRIPTION_RESULT_PATH: &str = "/subscription/result";

/// Unified in-app payment result path.
pub const PAYMENT_RESULT_PATH: &str = "/payment/result";

const CANONICAL_STATUS_PARAM: &str = "q";
const LEGACY_STATUS_PARAM: &str = "esewa_status";
const DATA_PARAM: &str = "data";

// Only used to resolve relative locations; never navigated to.
const LOCATION_BASE: &str = "http://app.invalid/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Success,
    Failure,
}

impl PaymentStatus {
    pub fn code(self) -> &'static str {
        match self {
            PaymentStatus::Success => "su",
            PaymentStatus::Failure => "fu",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "su" => Some(PaymentStatus::Success),
            "fu" => Some(PaymentStatus::Failure),
            _ => None,
        }
    }

    fn from_legacy(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(PaymentStatus::Success),
            "failure" => Some(PaymentStatus::Failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCallback {
    pub status: PaymentStatus,
    /// Opaque provider payload, passed through untouched.
    pub data: Option<String>,
}

impl PaymentCallback {
    /// Match a location against either callback shape.
    ///
    /// Returns `None` for anything that is not a well-formed callback; this
    /// function never fails.
    pub fn from_location(location: &str) -> Option<Self> {
        let (path, query) = split_location(location)?;
        Self::from_parts(&path, &query)
    }

    pub fn from_parts(path: &str, query: &[(String, String)]) -> Option<Self> {
        let param = |name: &str| {
            query
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };
        let data = param(DATA_PARAM).map(str::to_string);

        if normalize_path(path) == SUBSCRIPTION_RESULT_PATH {
            if let Some(status) = param(CANONICAL_STATUS_PARAM).and_then(PaymentStatus::from_code)
            {
                return Some(Self { status, data });
            }
        }

        param(LEGACY_STATUS_PARAM)
            .and_then(PaymentStatus::from_legacy)
            .map(|status| Self { status, data })
    }

    /// The replace-navigation target on the unified result path.
    pub fn redirect_target(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("status", self.status.code());
        if let Some(data) = &self.data {
            query.append_pair(DATA_PARAM, data);
        }
        format!("{PAYMENT_RESULT_PATH}?{}", query.finish())
    }
}

fn split_location(location: &str) -> Option<(String, Vec<(String, String)>)> {
    let base = Url::parse(LOCATION_BASE).ok()?;
    let url = base.join(location).ok()?;
    let query = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    Some((url.path().to_string(), query))
}

fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_shape_on_subscription_path_redirects() {
        let callback = PaymentCallback::from_location("/subscription/result?q=su&data=XYZ")
            .expect("canonical callback");

        assert_eq!(callback.status, PaymentStatus::Success);
        assert_eq!(callback.redirect_target(), "/payment/result?status=su&data=XYZ");
    }

    #[test]
    fn canonical_shape_elsewhere_is_ignored() {
        assert_eq!(PaymentCallback::from_location("/home?q=su&data=XYZ"), None);
    }

    #[test]
    fn legacy_shape_anywhere_maps_to_canonical() {
        let success = PaymentCallback::from_location("/anything/here?esewa_status=success&data=XYZ")
            .expect("legacy callback");
        let failure = PaymentCallback::from_location("/?esewa_status=failure&data=XYZ")
            .expect("legacy callback");

        assert_eq!(success.redirect_target(), "/payment/result?status=su&data=XYZ");
        assert_eq!(failure.redirect_target(), "/payment/result?status=fu&data=XYZ");
    }

    #[test]
    fn malformed_shapes_no_op() {
        for location in [
            "/subscription/result?q=maybe&data=XYZ",
            "/subscription/result",
            "/dashboard?esewa_status=pending",
            "/payment/result?status=su&data=XYZ",
            "",
        ] {
            assert_eq!(PaymentCallback::from_location(location), None, "{location}");
        }
    }

    #[test]
    fn missing_data_is_omitted_from_target() {
        let callback =
            PaymentCallback::from_location("/subscription/result/?q=fu").expect("callback");
        assert_eq!(callback.data, None);
        assert_eq!(callback.redirect_target(), "/payment/result?status=fu");
    }

    #[test]
    fn provider_payload_is_re_encoded_verbatim() {
        let callback =
            PaymentCallback::from_location("/subscription/result?q=su&data=a%2Bb%3D%3D")
                .expect("callback");
        assert_eq!(callback.data.as_deref(), Some("a+b=="));
        assert_eq!(
            callback.redirect_target(),
            "/payment/result?status=su&data=a%2Bb%3D%3D"
        );
    }
}

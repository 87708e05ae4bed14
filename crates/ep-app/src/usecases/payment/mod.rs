mod normalize_callback;

pub use normalize_callback::NormalizePaymentCallback;

//! Host form-binding contract.
//!
//! Any UI framework's two-way binding can drive a dropdown through
//! [`FormControl`]: the host writes values in and registers callbacks that
//! the dropdown invokes when its value changes or when it is touched.

use std::sync::Arc;

use serde_json::Value;

use crate::selection::Selection;

/// Called with the new selection after every value change.
pub type OnChange = Arc<dyn Fn(&Selection) + Send + Sync>;

/// Called when the control is touched (its panel closes).
pub type OnTouched = Arc<dyn Fn() + Send + Sync>;

/// A control bound to a host form value.
pub trait FormControl {
    /// Seed the control from an external value. Never notifies the host.
    fn write_value(&self, value: &Value);

    /// Register the value-change callback, replacing any previous one.
    fn register_on_change(&self, callback: OnChange);

    /// Register the touched callback, replacing any previous one.
    fn register_on_touched(&self, callback: OnTouched);

    /// Current value in host form.
    fn value(&self) -> Value;
}

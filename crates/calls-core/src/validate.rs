//! Create-path validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result, call::CallInfo};

/// `+`, then one to fifteen digits.
static E164: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\+[0-9]{1,15}$").expect("E.164 pattern is valid")
});

/// Whether `number` is a well-formed E.164 phone number.
pub fn is_e164(number: &str) -> bool { E164.is_match(number) }

/// Check the client-supplied fields of a new call.
///
/// Fields are checked in order and the first failure is reported. `id`,
/// `status` and `created_at` are ignored.
pub fn validate_new_call(call: &CallInfo) -> Result<()> {
  if call.client_name.is_empty() {
    return Err(Error::Validation("client_name is required".into()));
  }
  if call.phone_number.is_empty() {
    return Err(Error::Validation("phone_number is required".into()));
  }
  if !is_e164(&call.phone_number) {
    return Err(Error::Validation(format!(
      "phone_number must be in E.164 format, got {:?}",
      call.phone_number
    )));
  }
  if call.description.is_empty() {
    return Err(Error::Validation("description is required".into()));
  }
  Ok(())
}

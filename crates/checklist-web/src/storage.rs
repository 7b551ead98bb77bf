use checklist_core::error::{
  ChecklistError,
  Result
};
use checklist_core::storage::KeyValueStorage;

/// `window.localStorage`, looked up
/// on every call so a disabled store
/// surfaces as an error at write time
/// instead of at startup.
#[derive(Debug, Default)]
pub struct LocalStorage;

fn local_storage(
  key: &str
) -> Result<web_sys::Storage> {
  web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .ok_or_else(|| {
      storage_error(
        key,
        "localStorage is unavailable"
      )
    })
}

fn js_failure(
  key: &str,
  err: wasm_bindgen::JsValue
) -> ChecklistError {
  storage_error(key, format!("{err:?}"))
}

fn storage_error(
  key: &str,
  reason: impl Into<String>
) -> ChecklistError {
  ChecklistError::Storage {
    key:    key.to_string(),
    reason: reason.into()
  }
}

impl KeyValueStorage for LocalStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>> {
    local_storage(key)?
      .get_item(key)
      .map_err(|err| {
        js_failure(key, err)
      })
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<()> {
    local_storage(key)?
      .set_item(key, value)
      .map_err(|err| {
        tracing::error!(
          key,
          "localStorage write failed"
        );
        js_failure(key, err)
      })
  }

  fn remove_item(
    &mut self,
    key: &str
  ) -> Result<()> {
    local_storage(key)?
      .remove_item(key)
      .map_err(|err| {
        js_failure(key, err)
      })
  }
}

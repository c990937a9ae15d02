//! JSON documents with the failing JSON path in every error.
use serde::de::DeserializeOwned;

use crate::error::GenError;

/// `origin` names the document (file path, `<stdin>`) in the error.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str, origin: &str) -> Result<T, GenError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        GenError::Document {
            path: origin.to_string(),
            message: format!("at JSON path {path} → {}", err.into_inner()),
        }
    })
}

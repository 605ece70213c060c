// Browser file download via Blob URL

use crate::errors::UiError;
use wasm_bindgen::JsCast;

/// Offer `bytes` to the user as a file named `filename`
pub fn download_bytes(bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), UiError> {
    let blob_parts = js_sys::Array::new();
    let uint8_array = js_sys::Uint8Array::from(bytes);
    blob_parts.push(&uint8_array);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
        .map_err(|e| UiError::from_js("Blob", &e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| UiError::from_js("createObjectURL", &e))?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| UiError::Dom("document がありません".to_string()))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| UiError::from_js("createElement", &e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| UiError::Dom("a 要素を作成できません".to_string()))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(|e| UiError::from_js("revokeObjectURL", &e))?;
    Ok(())
}

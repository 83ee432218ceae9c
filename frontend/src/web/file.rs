//! 图片文件读取
//!
//! 贡献与内容表单中的图片以 data URL 的形式随 JSON 一起提交。

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, FileReader, HtmlInputElement};

/// 取出 `<input type="file">` 中选中的第一个文件
pub fn selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// 将文件读为 data URL；读取失败返回 `None`
pub async fn read_data_url(file: File) -> Option<String> {
    let reader = FileReader::new().ok()?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let on_load = Closure::once_into_js({
            let reader = reader.clone();
            move || {
                let result = reader.result().unwrap_or(JsValue::NULL);
                let _ = resolve.call1(&JsValue::NULL, &result);
            }
        });
        let on_error = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
    });

    if let Err(e) = reader.read_as_data_url(&file) {
        tracing::warn!(error = ?e, name = %file.name(), "could not start reading file");
        return None;
    }

    match JsFuture::from(promise).await {
        Ok(value) => value.as_string(),
        Err(e) => {
            tracing::warn!(error = ?e, name = %file.name(), "failed to read file");
            None
        }
    }
}

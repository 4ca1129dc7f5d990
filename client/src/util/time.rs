//! Timestamp helpers for table cells and request bodies.
//!
//! In the browser, server timestamps are shown in the viewer's locale and
//! time zone. The native build (SSR and tests) has no locale, so it falls
//! back to trimming the ISO string.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Current time as an ISO 8601 string, when a browser clock is available.
pub fn now_iso() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0().to_iso_string().as_string()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Calendar date of a timestamp, e.g. `2024-05-01`.
pub fn format_date(iso: Option<&str>) -> String {
    let Some(value) = non_blank(iso) else {
        return "-".to_owned();
    };
    #[cfg(feature = "hydrate")]
    if let Some(date) = parse_js_date(value) {
        return String::from(date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED));
    }
    value.split('T').next().unwrap_or(value).to_owned()
}

/// Date and time of a timestamp to the second, e.g. `2024-05-01 10:00:00`.
pub fn format_timestamp(iso: Option<&str>) -> String {
    let Some(value) = non_blank(iso) else {
        return "-".to_owned();
    };
    #[cfg(feature = "hydrate")]
    if let Some(date) = parse_js_date(value) {
        return String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED));
    }
    let Some((date, time)) = value.split_once('T') else {
        return value.to_owned();
    };
    format!("{date} {}", wall_clock(time))
}

fn non_blank(iso: Option<&str>) -> Option<&str> {
    iso.map(str::trim).filter(|s| !s.is_empty())
}

/// `hh:mm:ss` part of an ISO time, without fraction, `Z` or `±hh:mm` offset.
fn wall_clock(time: &str) -> &str {
    let end = time.find(['.', 'Z', 'z', '+', '-']).unwrap_or(time.len());
    &time[..end]
}

#[cfg(feature = "hydrate")]
fn parse_js_date(value: &str) -> Option<js_sys::Date> {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(value));
    if date.get_time().is_nan() { None } else { Some(date) }
}

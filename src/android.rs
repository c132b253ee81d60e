//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge. The Kotlin
//! side owns the note list and audio; these entry points supply the staff
//! drawing and the click-to-pitch mapping.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jstring};
use jni::JNIEnv;

use crate::{config_from_json, preview_click, render_empty_staff, GridConfig};

fn read_config(env: &mut JNIEnv, config_json: &JString) -> Option<GridConfig> {
    let json: Option<String> = if config_json.is_null() {
        None
    } else {
        Some(env.get_string(config_json).ok()?.into())
    };
    config_from_json(json.as_deref()).ok()
}

/// Render the empty staff for a configuration (null for the default).
///
/// Called from Kotlin as:
///   external fun renderStaff(configJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_staffpad_app_StaffPad_renderStaff(
    mut env: JNIEnv,
    _class: JClass,
    config_json: JString,
) -> jstring {
    let Some(config) = read_config(&mut env, &config_json) else {
        return std::ptr::null_mut();
    };

    match render_empty_staff(&config) {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}

/// Snap a click to the grid and describe the resulting pitch as JSON.
/// Returns null for clicks outside the staff.
///
/// Called from Kotlin as:
///   external fun resolveClick(configJson: String?, x: Float, y: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_staffpad_app_StaffPad_resolveClick(
    mut env: JNIEnv,
    _class: JClass,
    config_json: JString,
    x: jfloat,
    y: jfloat,
) -> jstring {
    let Some(config) = read_config(&mut env, &config_json) else {
        return std::ptr::null_mut();
    };
    let Some(preview) = preview_click(&config, x as f64, y as f64) else {
        return std::ptr::null_mut();
    };

    match serde_json::to_string(&preview) {
        Ok(json) => match env.new_string(&json) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}

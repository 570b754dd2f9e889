//! C ABI for hosts that load the cdylib (wasm sandboxes, native plugins).
//!
//! Strings returned by [`decompile`] are owned by this library and must be
//! released with [`decompile_free`].
use std::ffi::{CStr, CString, c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice::from_raw_parts;

/// Disassemble `length` bytes at `buffer`, naming the result after `filename`.
///
/// # Safety
/// `filename` must be null or a valid NUL-terminated string. `buffer` must be
/// null or point to at least `length` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decompile(
    filename: *const c_char,
    buffer: *const u8,
    length: c_int,
) -> *mut c_char {
    let name = if filename.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(filename) }.to_string_lossy().into_owned()
    };

    let bytes: &[u8] = match usize::try_from(length) {
        Ok(len) if len > 0 && !buffer.is_null() => unsafe { from_raw_parts(buffer, len) },
        _ => &[],
    };

    let text = panic::catch_unwind(AssertUnwindSafe(|| super::decompile(&name, bytes)))
        .unwrap_or_else(|_| format!("Error decompyling {}: internal error\n", name));

    // Interior NULs would truncate the C string.
    match CString::new(text.replace('\0', "\\x00")) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Release a string returned by [`decompile`]. Null is ignored.
///
/// # Safety
/// `text` must come from [`decompile`] and must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decompile_free(text: *mut c_char) {
    if text.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(text) });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_inputs_still_produce_text() {
        unsafe {
            let out = decompile(ptr::null(), ptr::null(), 0);
            assert!(!out.is_null());
            let text = CStr::from_ptr(out).to_string_lossy().into_owned();
            assert!(text.starts_with("Error loading file"), "{text}");
            decompile_free(out);
        }
    }

    #[test]
    fn bad_magic_names_the_file() {
        let name = CString::new("junk.pyc").unwrap();
        let data = b"\x00\x00\x00\x00rest";
        unsafe {
            let out = decompile(name.as_ptr(), data.as_ptr(), data.len() as c_int);
            let text = CStr::from_ptr(out).to_string_lossy().into_owned();
            assert_eq!(text, "Could not load file junk.pyc\n");
            decompile_free(out);
            decompile_free(ptr::null_mut());
        }
    }
}

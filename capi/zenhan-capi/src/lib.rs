use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::sync::OnceLock;

use zenhan::{walker, Direction, Mode, Zenhan};

const ZENHAN_ABI_NUMBER: u32 = 1;

/// Returns the C ABI version number.
/// This value changes ONLY when the C ABI is broken.
#[no_mangle]
pub extern "C" fn zenhan_abi_number() -> u32 {
    ZENHAN_ABI_NUMBER
}

/// Returns the zenhan version string (UTF-8, null-terminated).
///
/// The returned pointer is valid for the lifetime of the program.
#[no_mangle]
pub extern "C" fn zenhan_version_string() -> *const c_char {
    static VERSION: OnceLock<CString> = OnceLock::new();
    VERSION
        .get_or_init(|| {
            CString::new(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| CString::default())
        })
        .as_ptr()
}

/// C API function `zenhan_h2z`: halfwidth to fullwidth.
///
/// `mode` is the category bitmask (ASCII = 1, DIGIT = 2, KANA = 4, ALL = 7).
/// `ignore` is an optional array of `ignore_len` UTF-8 strings to leave
/// unconverted; pass NULL / 0 for none.
///
/// Returns a heap string to be released with `zenhan_string_free`, or NULL on
/// invalid arguments (see `zenhan_last_error`). Input that is not valid UTF-8
/// is returned as an unchanged copy.
///
/// # Safety
/// `input` must be a valid NUL-terminated string. `ignore`, when not NULL,
/// must point to `ignore_len` valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn zenhan_h2z(
    input: *const c_char,
    mode: u32,
    ignore: *const *const c_char,
    ignore_len: usize,
) -> *mut c_char {
    convert_core(input, Direction::H2z, mode, ignore, ignore_len)
}

/// C API function `zenhan_z2h`: fullwidth to halfwidth.
///
/// Same contract as `zenhan_h2z`.
///
/// # Safety
/// See `zenhan_h2z`.
#[no_mangle]
pub unsafe extern "C" fn zenhan_z2h(
    input: *const c_char,
    mode: u32,
    ignore: *const *const c_char,
    ignore_len: usize,
) -> *mut c_char {
    convert_core(input, Direction::Z2h, mode, ignore, ignore_len)
}

/// C API function `zenhan_convert`, with string direction (`"h2z"`/`"z2h"`)
/// and string mode (`"ascii|kana"`, `"all"`...).
///
/// # Safety
/// All three pointers must be valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn zenhan_convert(
    input: *const c_char,
    direction: *const c_char,
    mode: *const c_char,
) -> *mut c_char {
    if direction.is_null() || mode.is_null() {
        Zenhan::set_last_error("Invalid argument: direction or mode is NULL");
        return ptr::null_mut();
    }

    let direction = match CStr::from_ptr(direction).to_str() {
        Ok(s) => s,
        Err(_) => return fail("Invalid UTF-8 direction string"),
    };
    let mode = match CStr::from_ptr(mode).to_str() {
        Ok(s) => s,
        Err(_) => return fail("Invalid UTF-8 mode string"),
    };

    let direction = match Direction::try_from(direction) {
        Ok(d) => d,
        Err(err) => return fail(&err.to_string()),
    };
    let mode = match Mode::try_from(mode) {
        Ok(m) => m,
        Err(err) => return fail(&err.to_string()),
    };

    convert_core(input, direction, mode.bits(), ptr::null(), 0)
}

// ------ Core Shared Helpers ------

#[inline]
fn fail(msg: &str) -> *mut c_char {
    Zenhan::set_last_error(msg);
    ptr::null_mut()
}

/// Collects the caller's exclusion strings.
unsafe fn collect_ignore(
    ignore: *const *const c_char,
    ignore_len: usize,
) -> Result<Vec<String>, &'static str> {
    if ignore.is_null() || ignore_len == 0 {
        return Ok(Vec::new());
    }

    let entries = std::slice::from_raw_parts(ignore, ignore_len);
    let mut out = Vec::with_capacity(ignore_len);
    for &entry in entries {
        if entry.is_null() {
            return Err("Invalid argument: ignore entry is NULL");
        }
        match CStr::from_ptr(entry).to_str() {
            Ok(s) => out.push(s.to_string()),
            Err(_) => return Err("Invalid UTF-8 ignore string"),
        }
    }
    Ok(out)
}

/// Shared core: validate arguments -> convert bytes -> return heap C string.
unsafe fn convert_core(
    input: *const c_char,
    direction: Direction,
    mode: u32,
    ignore: *const *const c_char,
    ignore_len: usize,
) -> *mut c_char {
    if input.is_null() {
        return fail("Invalid argument: input is NULL");
    }

    let mode = match Mode::from_ffi(mode) {
        Some(m) => m,
        None => return fail(&format!("Invalid mode: {}", mode)),
    };

    let ignore = match collect_ignore(ignore, ignore_len) {
        Ok(v) => v,
        Err(msg) => return fail(msg),
    };

    // Malformed UTF-8 comes back as an unchanged copy.
    let bytes = CStr::from_ptr(input).to_bytes();
    let converted = walker::convert_bytes(bytes, direction, mode, &ignore);

    match CString::new(converted.into_owned()) {
        Ok(cstr) => {
            Zenhan::clear_last_error();
            cstr.into_raw()
        }
        Err(_) => fail("Output contains NUL byte"),
    }
}

/// C API function `zenhan_string_free`.
///
/// # Safety
/// `ptr` must be NULL or a string returned by this library, freed only once.
#[no_mangle]
pub unsafe extern "C" fn zenhan_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

/// C API function `zenhan_last_error`.
///
/// Always returns a heap-allocated string ("No error" when none is recorded);
/// release it with `zenhan_error_free`.
#[no_mangle]
pub extern "C" fn zenhan_last_error() -> *mut c_char {
    let msg: String = match Zenhan::get_last_error() {
        Some(err) if !err.is_empty() => err,
        _ => "No error".to_string(),
    };

    // Never panic across FFI boundary
    CString::new(msg).unwrap_or_default().into_raw()
}

/// C API function `zenhan_clear_last_error`.
#[no_mangle]
pub extern "C" fn zenhan_clear_last_error() {
    Zenhan::clear_last_error();
}

/// C API function `zenhan_error_free`.
///
/// # Safety
/// `ptr` must be NULL or a string returned by `zenhan_last_error`.
#[no_mangle]
pub unsafe extern "C" fn zenhan_error_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

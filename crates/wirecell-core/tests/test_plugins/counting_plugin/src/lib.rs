#![allow(non_snake_case)]

use std::ffi::c_void;
use std::sync::atomic::{AtomicUsize, Ordering};

static PLUGIN_CALLS: AtomicUsize = AtomicUsize::new(0);
static LAZY_CALLS: AtomicUsize = AtomicUsize::new(0);

#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn register_Counting_Factory(_registry: *mut c_void) {
    PLUGIN_CALLS.fetch_add(1, Ordering::SeqCst);
}

/// Per-type entry point that registers nothing.
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn register_Lazy_Factory(_registry: *mut c_void) {
    LAZY_CALLS.fetch_add(1, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn counting_plugin_calls() -> usize {
    PLUGIN_CALLS.load(Ordering::SeqCst)
}

#[unsafe(no_mangle)]
pub extern "C" fn counting_plugin_lazy_calls() -> usize {
    LAZY_CALLS.load(Ordering::SeqCst)
}

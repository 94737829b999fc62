pub mod content;
pub mod env;
pub mod tracing;
pub mod verify;

use std::hint::black_box;

/// Performs `&str` comparisons in constant time in an attempt to close any and all side-channels
/// that might leak information about our key
pub fn constant_time_cmp(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut res = 0u8;

    // black_box on each operand to keep the optimizer from collapsing the
    // loop into an early-exit comparison
    for i in 0..a.len() {
        let left = *black_box(&a[i]);
        let right = *black_box(&b[i]);
        res |= black_box(left ^ right);
    }

    res == 0
}

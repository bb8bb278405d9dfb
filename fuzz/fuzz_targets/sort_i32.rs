#![no_main]

use libfuzzer_sys::fuzz_target;

use blipsort_fuzz::util::bytes_as_i32;

fuzz_target!(|data: &[u8]| {
    let mut v = bytes_as_i32(data);
    blipsort::sort(&mut v);
    assert!(v.windows(2).all(|w| w[0] <= w[1]));
});

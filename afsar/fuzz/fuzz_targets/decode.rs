#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate afsar;

fuzz_target!(|data: &[u8]| {
    let mut src = data;
    let _result = afsar::Archive::read_from(&mut src);
});

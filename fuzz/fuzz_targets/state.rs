#![no_main]

use libfuzzer_sys::fuzz_target;
use tla_scan::{Scanner, MAX_SERIALIZED_SIZE};

fuzz_target!(|data: &[u8]| {
    // Deserialization must be total: arbitrary buffers either restore a
    // state or reset to the initial one, and the result always serializes.
    let mut scanner = Scanner::new();
    scanner.deserialize(data);
    let mut buffer = [0u8; MAX_SERIALIZED_SIZE];
    let written = scanner.serialize(&mut buffer).unwrap();

    let mut reloaded = Scanner::new();
    reloaded.deserialize(&buffer[..written]);
    assert_eq!(reloaded, scanner);
});

#![no_main]

use libfuzzer_sys::fuzz_target;

use nttcalc_core::primality::is_prime;
use nttcalc_core::{find_modulus, find_primitive_root, is_primitive_root, NttError};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // Two bytes of digit bound, two bytes of length
    let base = u64::from(u16::from_le_bytes([data[0], data[1]]));
    let n = usize::from(u16::from_le_bytes([data[2], data[3]])) % 4096;

    match find_modulus(base, n) {
        Ok(modulus) => {
            assert!(is_prime(modulus));
            assert_eq!((modulus - 1) % n as u64, 0);
            assert!(modulus >= base * base * n as u64 - 1);
            let w = find_primitive_root(n, modulus).unwrap();
            assert!(is_primitive_root(w, n, modulus));
        }
        Err(NttError::InvalidBase(_)) => assert!(base < 2),
        Err(NttError::InvalidLength { .. }) => assert_eq!(n, 0),
        Err(e) => panic!("unexpected error for base={base}, n={n}: {e}"),
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;

use nttcalc_core::arith::mul_mod;
use nttcalc_core::MontgomeryField;

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }
    let word = |i: usize| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&data[i * 8..i * 8 + 8]);
        u64::from_le_bytes(buf)
    };
    // Any odd modulus in [3, 2^62) is valid, prime or not
    let modulus = (word(0) % ((1 << 62) - 3) + 3) | 1;
    let Ok(field) = MontgomeryField::new(modulus) else {
        return;
    };
    assert_eq!(modulus.wrapping_mul(field.mod_inv()), 1);

    let (a, b) = (word(1) % modulus, word(2) % modulus);
    let product = field.multiply(field.to_montgomery(a), field.to_montgomery(b));
    assert!(product < modulus);
    assert_eq!(field.from_montgomery(product), mul_mod(a, b, modulus));
});

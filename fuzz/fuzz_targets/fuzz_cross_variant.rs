#![no_main]

use libfuzzer_sys::fuzz_target;

use nttcalc_core::{
    ExecutionStrategy, MultiplierKind, NttContext, TransformOptions, Variant,
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First byte picks the options, the rest are byte digits padded to a power of two
    let flags = data[0];
    let mut seq: Vec<u64> = data[1..].iter().take(1024).map(|&b| u64::from(b)).collect();
    seq.resize(seq.len().next_power_of_two(), 0);

    let opts = TransformOptions {
        multiplier: if flags & 1 == 0 {
            MultiplierKind::Plain
        } else {
            MultiplierKind::Montgomery
        },
        strategy: if flags & 2 == 0 {
            ExecutionStrategy::Sequential
        } else {
            ExecutionStrategy::Parallel
        },
        parallel_threshold: 8,
    };

    let Ok(ctx) = NttContext::new(255, seq.len()) else {
        return;
    };
    let reference = ctx.forward(&seq, Variant::Iterative, &opts).unwrap();
    for variant in [Variant::Recursive, Variant::BitReversed] {
        let got = ctx.forward(&seq, variant, &opts).unwrap();
        assert_eq!(got, reference, "{variant} != iterative at n={}", seq.len());
    }
    if seq.len() <= 64 {
        let naive = ctx.forward(&seq, Variant::Naive, &opts).unwrap();
        assert_eq!(naive, reference, "naive != iterative at n={}", seq.len());
    }
    let back = ctx.inverse(&reference, Variant::Iterative, &opts).unwrap();
    assert_eq!(back, seq, "round trip failed at n={}", seq.len());
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use mpalist::decoder::{decode_chunk, explore_chunk, pairs_from_bytes, ChannelOrigin};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode without panicking, and both passes must agree.
    let pairs = pairs_from_bytes(data);
    let summary = explore_chunk(&pairs);
    let decoded = decode_chunk(&pairs, ChannelOrigin::Zero);

    assert_eq!(summary.counts, decoded.counts);
    assert_eq!(summary.channel_mask, decoded.channel_mask);
});

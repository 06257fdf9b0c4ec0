// tests/copy_engine_tests.rs
use accessors_rs::*;
use proptest::prelude::*;

fn patterned_bytes(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

/// Reference model: element-local byte reversal.
fn reversed_elements(src: &[u8], width: usize, count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * count);
    for element in src[..width * count].chunks_exact(width) {
        out.extend(element.iter().rev());
    }
    out
}

#[test]
fn test_scenario_w2_n3() {
    let src = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06];
    let mut dst = [0u8; 6];
    let status =
        copy_slices(&mut dst, &src, 2, 3, Endianness::Little, Endianness::Big).unwrap();
    assert_eq!(status, CopyStatus::Ok);
    assert_eq!(dst, [0x02, 0x01, 0x04, 0x03, 0x06, 0x05]);
}

#[test]
fn test_scenario_w4_n1() {
    let src = [0xdeu8, 0xad, 0xbe, 0xef];
    let mut dst = [0u8; 4];
    copy_slices(&mut dst, &src, 4, 1, Endianness::Little, Endianness::Big).unwrap();
    assert_eq!(dst, [0xef, 0xbe, 0xad, 0xde]);
}

#[test]
fn test_scenario_w8_n2() {
    let src = [
        0x00u8, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, //
        0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
    ];
    let mut dst = [0u8; 16];
    copy_slices(&mut dst, &src, 8, 2, Endianness::Little, Endianness::Big).unwrap();
    assert_eq!(
        dst,
        [
            0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11, 0x00, //
            0xff, 0xee, 0xdd, 0xcc, 0xbb, 0xaa, 0x99, 0x88,
        ]
    );
}

#[test]
fn test_scenario_w2_n5_batch_plus_tail() {
    let src = [
        0xa1u8, 0xa2, 0xb1, 0xb2, 0xc1, 0xc2, 0xd1, 0xd2, 0xe1, 0xe2,
    ];
    let mut dst = [0u8; 10];
    copy_slices(&mut dst, &src, 2, 5, Endianness::Little, Endianness::Big).unwrap();
    assert_eq!(
        dst,
        [0xa2, 0xa1, 0xb2, 0xb1, 0xc2, 0xc1, 0xd2, 0xd1, 0xe2, 0xe1]
    );
}

#[test]
fn test_scenario_w1_ignores_tags() {
    let src = [0x11u8, 0x22, 0x33, 0x44];
    let mut dst = [0u8; 4];
    copy_slices(&mut dst, &src, 1, 4, Endianness::Little, Endianness::Big).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn test_scenario_invalid_width_preserves_sentinel() {
    let src = [0u8; 30];
    let mut dst = [0x5au8; 30];

    for (src_endian, dst_endian) in [
        (Endianness::Little, Endianness::Big),
        (Endianness::Little, Endianness::Little),
    ] {
        let status = copy_slices(&mut dst, &src, 3, 10, src_endian, dst_endian).unwrap();
        assert_eq!(status, CopyStatus::InvalidDataSize);
        assert_eq!(status.as_raw(), 1);
        assert_eq!(dst, [0x5au8; 30]);
    }
}

#[test]
fn test_tail_correctness_w2() {
    // n = 0..=7 exercises the empty case, pure-tail, exactly one quad, and
    // quad-plus-residual splits.
    for n in 0..=7usize {
        let src = patterned_bytes(n * 2, 7);
        let mut dst = vec![0u8; n * 2];
        copy_slices(&mut dst, &src, 2, n, Endianness::Big, Endianness::Little).unwrap();
        assert_eq!(dst, reversed_elements(&src, 2, n), "n = {n}");
    }
}

#[test]
fn test_tail_correctness_w4() {
    for n in 0..=3usize {
        let src = patterned_bytes(n * 4, 11);
        let mut dst = vec![0u8; n * 4];
        copy_slices(&mut dst, &src, 4, n, Endianness::Big, Endianness::Little).unwrap();
        assert_eq!(dst, reversed_elements(&src, 4, n), "n = {n}");
    }
}

#[test]
fn test_w8_counts() {
    for n in [0usize, 1, 2, 9, 33] {
        let src = patterned_bytes(n * 8, 13);
        let mut dst = vec![0u8; n * 8];
        copy_slices(&mut dst, &src, 8, n, Endianness::Little, Endianness::Big).unwrap();
        assert_eq!(dst, reversed_elements(&src, 8, n), "n = {n}");
    }
}

#[test]
fn test_identity_under_equal_tags() {
    for width in SUPPORTED_WIDTHS {
        let count = 17;
        let src = patterned_bytes(width * count, width as u8);
        let mut dst = vec![0u8; width * count];
        for tag in [Endianness::Little, Endianness::Big] {
            dst.fill(0);
            let status = copy_slices(&mut dst, &src, width, count, tag, tag).unwrap();
            assert_eq!(status, CopyStatus::Ok);
            assert_eq!(dst, src, "width = {width}");
        }
    }
}

#[test]
fn test_involution() {
    for width in [2usize, 4, 8] {
        let count = 13;
        let src = patterned_bytes(width * count, 99);
        let mut once = vec![0u8; width * count];
        let mut twice = vec![0u8; width * count];

        copy_slices(&mut once, &src, width, count, Endianness::Little, Endianness::Big).unwrap();
        copy_slices(&mut twice, &once, width, count, Endianness::Little, Endianness::Big).unwrap();
        assert_eq!(twice, src, "width = {width}");
    }
}

#[test]
fn test_transfer_touches_exact_span() {
    // One guard byte past the transfer span in both buffers must survive.
    let width = 2usize;
    let count = 5;
    let src = patterned_bytes(width * count + 1, 3);
    let mut dst = vec![0xeeu8; width * count + 1];

    copy_slices(&mut dst, &src, width, count, Endianness::Little, Endianness::Big).unwrap();
    assert_eq!(dst[width * count], 0xee);
    assert_eq!(&dst[..width * count], &reversed_elements(&src, width, count)[..]);
}

#[test]
fn test_unaligned_bases_within_element_alignment() {
    // Element-aligned but not 8-aligned: start two bytes into an allocation.
    let backing = patterned_bytes(34, 21);
    let src = &backing[2..];
    let mut dst_backing = vec![0u8; 34];
    let dst = &mut dst_backing[2..];

    copy_slices(dst, src, 2, 16, Endianness::Little, Endianness::Big).unwrap();
    assert_eq!(dst.to_vec(), reversed_elements(src, 2, 16));
}

#[test]
fn test_direct_source_through_engine() {
    let mut src = DirectSource::alloc(16).unwrap();
    let dst = DirectSource::alloc(16).unwrap();

    src.put_u64(0, 0x0011_2233_4455_6677, Endianness::Little)
        .unwrap();
    src.put_u64(8, 0x8899_aabb_ccdd_eeff, Endianness::Little)
        .unwrap();

    let status = unsafe {
        copy_memory(
            &NoPinner,
            src.region(0),
            dst.region(0),
            8,
            2,
            Endianness::Little,
            Endianness::Big,
        )
    }
    .unwrap();
    assert_eq!(status, CopyStatus::Ok);

    assert_eq!(
        dst.get_u64(0, Endianness::Big).unwrap(),
        0x0011_2233_4455_6677
    );
    assert_eq!(
        dst.get_u64(8, Endianness::Big).unwrap(),
        0x8899_aabb_ccdd_eeff
    );
}

#[test]
fn test_managed_to_raw_with_offsets() {
    let registry = RegionRegistry::new();
    let payload = patterned_bytes(20, 5);
    let src = registry.insert_from(&payload);

    let mut dst = vec![0u8; 24];
    let status = unsafe {
        copy_memory(
            &registry,
            Region::managed(src, 4),
            Region::raw(dst.as_mut_ptr(), 8),
            4,
            4,
            Endianness::Little,
            Endianness::Big,
        )
    }
    .unwrap();
    assert_eq!(status, CopyStatus::Ok);

    assert_eq!(dst[..8], [0u8; 8]);
    assert_eq!(dst[8..24], reversed_elements(&payload[4..], 4, 4)[..]);
    assert_eq!(registry.pin_count(src).unwrap(), 0);
}

proptest! {
    #[test]
    fn prop_identity_under_equal_tags(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        width_index in 0usize..4,
        big in any::<bool>(),
    ) {
        let width = SUPPORTED_WIDTHS[width_index];
        let count = bytes.len() / width;
        let tag = if big { Endianness::Big } else { Endianness::Little };

        let mut dst = vec![0u8; width * count];
        let status = copy_slices(&mut dst, &bytes, width, count, tag, tag).unwrap();
        prop_assert_eq!(status, CopyStatus::Ok);
        prop_assert_eq!(&dst[..], &bytes[..width * count]);
    }

    #[test]
    fn prop_element_local_reversal(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        width_index in 1usize..4,
    ) {
        let width = SUPPORTED_WIDTHS[width_index];
        let count = bytes.len() / width;

        let mut dst = vec![0u8; width * count];
        copy_slices(&mut dst, &bytes, width, count, Endianness::Little, Endianness::Big).unwrap();

        for i in 0..count {
            for k in 0..width {
                prop_assert_eq!(
                    dst[i * width + k],
                    bytes[i * width + (width - 1 - k)],
                    "element {} byte {}", i, k
                );
            }
        }
    }

    #[test]
    fn prop_involution(
        bytes in proptest::collection::vec(any::<u8>(), 0..512),
        width_index in 1usize..4,
    ) {
        let width = SUPPORTED_WIDTHS[width_index];
        let count = bytes.len() / width;

        let mut once = vec![0u8; width * count];
        let mut twice = vec![0u8; width * count];
        copy_slices(&mut once, &bytes, width, count, Endianness::Big, Endianness::Little).unwrap();
        copy_slices(&mut twice, &once, width, count, Endianness::Big, Endianness::Little).unwrap();
        prop_assert_eq!(&twice[..], &bytes[..width * count]);
    }

    #[test]
    fn prop_in_place_swap_matches_copy(
        values in proptest::collection::vec(any::<u32>(), 0..128),
    ) {
        let mut in_place = values.clone();
        swap::swap_slice_in_place(&mut in_place).unwrap();

        let src_bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        let mut copied = vec![0u8; src_bytes.len()];
        copy_slices(
            &mut copied,
            &src_bytes,
            4,
            values.len(),
            Endianness::Little,
            Endianness::Big,
        )
        .unwrap();

        let in_place_bytes: Vec<u8> = in_place.iter().flat_map(|v| v.to_ne_bytes()).collect();
        prop_assert_eq!(in_place_bytes, copied);
    }
}

//! Row-major conversion is an exact inverse for in-range subscripts.

use proptest::prelude::*;

use dispview::core::{row_major_to_subscripts, subscripts_to_row_major, RowMajorIndices};

fn check_roundtrip<const R: usize>(shape: [usize; R], seed: [usize; R]) {
    let mut subs = [0usize; R];
    for axis in 0..R {
        subs[axis] = seed[axis] % shape[axis];
    }
    let index = subscripts_to_row_major(&shape, &subs).unwrap();
    assert!(index < shape.iter().product::<usize>());
    assert_eq!(row_major_to_subscripts(&shape, index), Some(subs));
}

#[test]
fn test_scalar_roundtrip() {
    check_roundtrip::<0>([], []);
}

proptest! {
    #[test]
    fn roundtrip_rank1(shape in prop::array::uniform1(1usize..64), seed in prop::array::uniform1(any::<usize>())) {
        check_roundtrip(shape, seed);
    }

    #[test]
    fn roundtrip_rank2(shape in prop::array::uniform2(1usize..16), seed in prop::array::uniform2(any::<usize>())) {
        check_roundtrip(shape, seed);
    }

    #[test]
    fn roundtrip_rank3(shape in prop::array::uniform3(1usize..8), seed in prop::array::uniform3(any::<usize>())) {
        check_roundtrip(shape, seed);
    }

    #[test]
    fn roundtrip_rank4(shape in prop::array::uniform4(1usize..6), seed in prop::array::uniform4(any::<usize>())) {
        check_roundtrip(shape, seed);
    }

    #[test]
    fn indices_enumerate_in_row_major_order(shape in prop::array::uniform3(0usize..5)) {
        let mut count = 0usize;
        for (i, subs) in RowMajorIndices::new(shape).enumerate() {
            prop_assert_eq!(subscripts_to_row_major(&shape, &subs), Some(i));
            count += 1;
        }
        prop_assert_eq!(count, shape.iter().product::<usize>());
    }
}

use decode::{extract, LengthSize, Sample, SampleError};
use proptest::prelude::*;

fn length_prefixed(payloads: &[Vec<u8>], length_size: LengthSize) -> Vec<u8> {
    let mut out = Vec::new();
    for payload in payloads {
        let len = payload.len() as u32;
        out.extend_from_slice(&len.to_be_bytes()[4 - length_size.width()..]);
        out.extend_from_slice(payload);
    }
    out
}

fn length_size() -> impl Strategy<Value = LengthSize> {
    prop_oneof![
        Just(LengthSize::One),
        Just(LengthSize::Two),
        Just(LengthSize::Four),
    ]
}

// Non-empty payloads short enough for a 1-byte length field.
fn payloads() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 1..=255), 0..8)
}

proptest! {
    #[test]
    fn any_bytes_terminate_within_bounds(
        data in prop::collection::vec(any::<u8>(), 0..512),
        length_size in length_size(),
    ) {
        let sample = Sample::new(&data, length_size);
        let mut nal_units = sample.nal_units();
        let mut last_end = 0;

        for nal_unit in nal_units.by_ref() {
            match nal_unit {
                Ok(nal_unit) => {
                    prop_assert!(nal_unit.offset() >= last_end + length_size.width());
                    prop_assert!(nal_unit.end() <= data.len());
                    prop_assert!(!nal_unit.is_empty());
                    last_end = nal_unit.end();
                }
                Err(e) => prop_assert!(
                    matches!(e, SampleError::TruncatedNalu { .. }),
                    "unexpected error {e:?}"
                ),
            }
        }

        prop_assert!(nal_units.bytes_consumed() <= data.len());
    }

    #[test]
    fn extraction_recovers_encoded_payloads(
        payloads in payloads(),
        length_size in length_size(),
    ) {
        let data = length_prefixed(&payloads, length_size);
        let (nal_units, consumed) = Sample::new(&data, length_size)
            .strict(true)
            .extract_with_consumed()?;

        let decoded: Vec<Vec<u8>> = nal_units.iter().map(|n| n.to_vec()).collect();
        prop_assert_eq!(decoded, payloads);
        prop_assert_eq!(consumed, data.len());
    }

    #[test]
    fn width_does_not_change_the_result(payloads in payloads()) {
        let mut results = Vec::new();
        for length_size in [LengthSize::One, LengthSize::Two, LengthSize::Four] {
            let data = length_prefixed(&payloads, length_size);
            let nal_units = extract(&data, length_size.into())?;
            results.push(nal_units.iter().map(|n| n.to_vec()).collect::<Vec<_>>());
        }

        prop_assert_eq!(&results[0], &results[1]);
        prop_assert_eq!(&results[1], &results[2]);
    }

    #[test]
    fn zero_length_entries_are_skipped(
        payloads in payloads(),
        padding in prop::collection::vec(any::<bool>(), 8),
        length_size in length_size(),
    ) {
        let mut padded = Vec::new();
        for (payload, pad) in payloads.iter().zip(padding.iter().cycle()) {
            if *pad {
                padded.push(Vec::new());
            }
            padded.push(payload.clone());
        }

        let data = length_prefixed(&padded, length_size);
        let nal_units = Sample::new(&data, length_size).extract()?;

        prop_assert_eq!(nal_units.len(), payloads.len());
    }

    #[test]
    fn overrunning_length_is_an_error(
        payloads in payloads(),
        extra in 1usize..64,
        length_size in length_size(),
    ) {
        let mut data = length_prefixed(&payloads, length_size);
        let last_prefix = data.len();
        let tail = vec![0xAB; extra.min(254)];
        let declared = tail.len() + 1;
        data.extend_from_slice(&(declared as u32).to_be_bytes()[4 - length_size.width()..]);
        data.extend_from_slice(&tail);

        prop_assert_eq!(
            Sample::new(&data, length_size).extract(),
            Err(SampleError::TruncatedNalu {
                declared_length: declared,
                available: tail.len(),
                offset: last_prefix,
            })
        );
    }
}

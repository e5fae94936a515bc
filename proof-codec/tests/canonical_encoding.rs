// Canonical encoding properties for proofs and public inputs
// Run with: cargo test -p proof-codec --test canonical_encoding

use num_bigint::BigUint;
use num_traits::One;
use proof_codec::field::{FQ_BYTES, G1_BYTES, G2_BYTES, PROOF_BYTES};
use proof_codec::layout::{read_proof, read_public_inputs};
use proof_codec::{
    bytes_to_hex, corrupt_bit_flip, corrupt_increment, encode_proof, encode_public_inputs,
    hex_to_bytes, EncodingError, ProofObject, Scalar,
};
use proptest::prelude::*;

/// A proof shaped exactly like snarkjs output for the multiplier circuit
const SNARKJS_PROOF: &str = r#"{
    "pi_a": [
        "3047588472193811447937658209427830208421736536424958493611342066137547196427473373549326158634604357924898011717216",
        "1493745468385236839958234802591245566707419733449813473052817880306126099939632290839925512766447718339024212917553",
        "1"
    ],
    "pi_b": [
        [
            "2264432616378357066419315542917839734669689713458203386390546476406702395012557574474766426961396427612734911858339",
            "1116092005498347926702390484442474223398051066522221434512227958659470707316004587812016453004489063925432689447458"
        ],
        [
            "3215646883402541484063880009418302788419406440478689216512939017498102208306271014419713017226961094683017931212435",
            "2697133424766014810346104018451282096442306437512373960429390089282393463919917567891468613416367413052542001048024"
        ],
        ["1", "0"]
    ],
    "pi_c": [
        "1712006339463213024470853099826436498219577203488542498216402546779413620395283232442787451226330127468716014962766",
        "2980342386425409606587633212318112853627722203542003935216405474221546389626013627591186458553925406566226946302081",
        "1"
    ],
    "protocol": "groth16",
    "curve": "bls12381"
}"#;

fn snarkjs_proof() -> ProofObject {
    serde_json::from_str(SNARKJS_PROOF).unwrap()
}

fn fq_hex(decimal: &str) -> String {
    let value = BigUint::parse_bytes(decimal.as_bytes(), 10).unwrap();
    format!("{:0>96}", value.to_str_radix(16))
}

fn pow2(bits: usize) -> BigUint {
    BigUint::one() << bits
}

#[test]
fn proof_hex_round_trips_through_bytes() {
    let hex = encode_proof(&snarkjs_proof()).unwrap();
    let bytes = hex_to_bytes(&hex).unwrap();

    assert_eq!(bytes.len(), PROOF_BYTES);
    assert_eq!(bytes_to_hex(&bytes), hex);

    let view = read_proof(&bytes).unwrap();
    assert_eq!(view.a.len(), G1_BYTES);
    assert_eq!(view.b.len(), G2_BYTES);
    assert_eq!(view.c.len(), G1_BYTES);
}

#[test]
fn proof_b_limbs_are_written_c0_first() {
    let proof = snarkjs_proof();
    let hex = encode_proof(&proof).unwrap();

    let [x, y, ..] = proof.pi_b.as_slice() else {
        panic!("pi_b must have two coordinates");
    };
    let expected_b = [&x[1], &x[0], &y[1], &y[0]]
        .iter()
        .map(|limb| fq_hex(limb.as_str()))
        .collect::<String>();

    let b_start = G1_BYTES * 2;
    let b_hex = &hex[b_start..b_start + G2_BYTES * 2];
    assert_eq!(b_hex, expected_b);

    // The producer's order must NOT survive
    let unswapped = [&x[0], &x[1], &y[0], &y[1]]
        .iter()
        .map(|limb| fq_hex(limb.as_str()))
        .collect::<String>();
    assert_ne!(b_hex, unswapped);
}

#[test]
fn proof_b_fixed_vector() {
    let proof = ProofObject {
        pi_a: vec![Scalar::from("0"), Scalar::from("0")],
        pi_b: vec![
            vec![Scalar::from("17"), Scalar::from("34")],
            vec![Scalar::from("51"), Scalar::from("68")],
        ],
        pi_c: vec![Scalar::from("0"), Scalar::from("0")],
        protocol: None,
        curve: None,
    };
    let hex = encode_proof(&proof).unwrap();
    let pad = "00".repeat(FQ_BYTES - 1);

    let expected = format!(
        "{zeros}{pad}22{pad}11{pad}44{pad}33{zeros}",
        zeros = "00".repeat(G1_BYTES),
    );
    assert_eq!(hex, expected);
}

#[test]
fn coordinate_range_is_enforced_in_every_slot() {
    let too_big = Scalar::from(pow2(384).to_string());
    let negative = Scalar::from("-1");
    let max = Scalar::from((pow2(384) - 1u32).to_string());

    // 4 G1 coordinates + 4 G2 limbs
    for slot in 0..8 {
        for (value, should_fail) in [(&too_big, true), (&negative, true), (&max, false)] {
            let mut proof = snarkjs_proof();
            match slot {
                0 | 1 => proof.pi_a[slot] = value.clone(),
                2..=5 => proof.pi_b[(slot - 2) / 2][(slot - 2) % 2] = value.clone(),
                _ => proof.pi_c[slot - 6] = value.clone(),
            }

            let result = encode_proof(&proof);
            if should_fail {
                assert_eq!(
                    result,
                    Err(EncodingError::OutOfRange { width: FQ_BYTES }),
                    "slot {slot} accepted {value}"
                );
            } else {
                assert!(result.is_ok(), "slot {slot} rejected 2^384 - 1");
            }
        }
    }
}

#[test]
fn public_inputs_prefix_and_words() {
    let max = (pow2(256) - 1u32).to_string();
    let hex = encode_public_inputs(&[Scalar::from(7u64), Scalar::from("0"), Scalar::from(max)])
        .unwrap();

    assert_eq!(hex.len(), 8 + 3 * 64);
    assert!(hex.starts_with("00000003"));
    assert_eq!(&hex[8..72], format!("{:0>64}", "7"));
    assert_eq!(&hex[72..136], "0".repeat(64));
    assert_eq!(&hex[136..], "f".repeat(64));

    let words = read_public_inputs(&hex_to_bytes(&hex).unwrap()).unwrap();
    assert_eq!(words.len(), 3);
    assert_eq!(words[0][31], 7);
}

#[test]
fn public_inputs_reject_out_of_range() {
    for bad in [pow2(256).to_string(), "-5".to_string()] {
        assert_eq!(
            encode_public_inputs(&[Scalar::from("1"), Scalar::from(bad)]),
            Err(EncodingError::OutOfRange { width: 32 })
        );
    }
}

#[test]
fn corruption_boundary_inputs_are_noops() {
    assert_eq!(corrupt_bit_flip("").unwrap(), "");
    assert_eq!(corrupt_bit_flip("a").unwrap(), "a");
    assert_eq!(corrupt_increment("").unwrap(), "");
    assert_eq!(corrupt_increment("a").unwrap(), "a");
}

#[test]
fn corrupted_public_input_is_smallest_change() {
    let hex = encode_public_inputs(&[Scalar::from("33")]).unwrap();
    let corrupted = corrupt_increment(&hex).unwrap();
    assert_eq!(corrupted, encode_public_inputs(&[Scalar::from("34")]).unwrap());
}

proptest! {
    #[test]
    fn bit_flip_touches_one_bit_and_is_self_inverse(bytes in prop::collection::vec(any::<u8>(), 1..512)) {
        let hex = bytes_to_hex(&bytes);
        let flipped = corrupt_bit_flip(&hex).unwrap();
        let flipped_bytes = hex_to_bytes(&flipped).unwrap();

        prop_assert_eq!(flipped_bytes.len(), bytes.len());
        let last = bytes.len() - 1;
        prop_assert_eq!(&flipped_bytes[..last], &bytes[..last]);
        prop_assert_eq!((flipped_bytes[last] ^ bytes[last]).count_ones(), 1);
        prop_assert_eq!(corrupt_bit_flip(&flipped).unwrap(), hex);
    }

    #[test]
    fn increment_changes_only_last_byte(bytes in prop::collection::vec(any::<u8>(), 1..512)) {
        let corrupted = hex_to_bytes(&corrupt_increment(&bytes_to_hex(&bytes)).unwrap()).unwrap();
        let last = bytes.len() - 1;
        prop_assert_eq!(&corrupted[..last], &bytes[..last]);
        prop_assert_eq!(corrupted[last], bytes[last].wrapping_add(1));
    }

    #[test]
    fn public_inputs_round_trip(values in prop::collection::vec(any::<u128>(), 0..16)) {
        let signals: Vec<Scalar> = values.iter().map(|v| Scalar::from(v.to_string())).collect();
        let hex = encode_public_inputs(&signals).unwrap();
        let words = read_public_inputs(&hex_to_bytes(&hex).unwrap()).unwrap();

        prop_assert_eq!(words.len(), values.len());
        for (word, value) in words.iter().zip(&values) {
            prop_assert_eq!(&word[16..], &value.to_be_bytes()[..]);
            prop_assert!(word[..16].iter().all(|b| *b == 0));
        }
    }
}

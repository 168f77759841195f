use proptest::prelude::*;

use keydiv::message::{frame, DIV_CONSTANT, PADDED_LEN, PADDING_THRESHOLD, PAD_MARKER};
use keydiv::{derive, derive_components, DiversifyError, InputField};

fn nonzero_key() -> impl Strategy<Value = [u8; 16]> {
    any::<[u8; 16]>().prop_filter("all-zero key is rejected", |k| k.iter().any(|&b| b != 0))
}

proptest! {
    #[test]
    fn derive_is_deterministic(key in nonzero_key(), input in prop::collection::vec(any::<u8>(), 0..64)) {
        let k = hex::encode(key);
        let i = hex::encode(&input);
        prop_assert_eq!(derive(&k, &i).unwrap(), derive(&k, &i).unwrap());
    }

    #[test]
    fn output_is_32_uppercase_hex(key in nonzero_key(), input in prop::collection::vec(any::<u8>(), 0..64)) {
        let out = derive(&hex::encode(key), &hex::encode(&input)).unwrap();
        prop_assert_eq!(out.len(), 32);
        prop_assert!(out.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn input_case_does_not_matter(key in nonzero_key(), input in prop::collection::vec(any::<u8>(), 0..40)) {
        let lower = derive(&hex::encode(key), &hex::encode(&input)).unwrap();
        let upper = derive(&hex::encode_upper(key), &hex::encode_upper(&input)).unwrap();
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn wrong_key_length_rejected(key in prop::collection::vec(any::<u8>(), 0..48)) {
        prop_assume!(key.len() != 16);
        prop_assert_eq!(
            derive(&hex::encode(&key), "0411"),
            Err(DiversifyError::InvalidKeyLength { actual: key.len() })
        );
    }

    #[test]
    fn odd_length_rejected(key in nonzero_key(), input in "[0-9a-fA-F]{0,40}") {
        let odd = format!("{}0", input);
        prop_assume!(odd.len() % 2 == 1);
        prop_assert_eq!(
            derive(&hex::encode(key), &odd),
            Err(DiversifyError::InvalidEncoding { field: InputField::DiversificationInput })
        );
    }

    #[test]
    fn non_hex_rejected(key in nonzero_key(), prefix in "[0-9a-f]{0,10}", bad in "[g-zG-Z !#_]") {
        let input = format!("{}{}0", prefix, bad);
        let input = if input.len() % 2 == 1 { format!("{}0", input) } else { input };
        prop_assert_eq!(
            derive(&hex::encode(key), &input),
            Err(DiversifyError::InvalidEncoding { field: InputField::DiversificationInput })
        );

        let mut bad_key = hex::encode(key);
        bad_key.replace_range(0..1, &bad);
        prop_assert_eq!(
            derive(&bad_key, "0411"),
            Err(DiversifyError::InvalidEncoding { field: InputField::MasterKey })
        );
    }

    #[test]
    fn short_messages_pad_to_31(input in prop::collection::vec(any::<u8>(), 0..30)) {
        let m = frame(&input);
        prop_assert_eq!(m.len(), PADDED_LEN);
        prop_assert_eq!(m[0], DIV_CONSTANT);
        prop_assert_eq!(&m[1..=input.len()], &input[..]);
        prop_assert_eq!(m[input.len() + 1], PAD_MARKER);
        prop_assert!(m[input.len() + 2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn long_messages_pass_through(input in prop::collection::vec(any::<u8>(), (PADDING_THRESHOLD - 1)..96)) {
        let m = frame(&input);
        prop_assert_eq!(m.len(), input.len() + 1);
        prop_assert_eq!(m[0], DIV_CONSTANT);
        prop_assert_eq!(&m[1..], &input[..]);
    }

    #[test]
    fn swapping_components_changes_key(
        key in nonzero_key(),
        uid in prop::collection::vec(any::<u8>(), 4..10),
        app in prop::collection::vec(any::<u8>(), 3..4),
    ) {
        // uid || app == app || uid only for periodic inputs
        prop_assume!([&uid[..], &app[..]].concat() != [&app[..], &uid[..]].concat());
        let k = hex::encode(key);
        let a = derive_components(&k, &hex::encode(&uid), &hex::encode(&app), "").unwrap();
        let b = derive_components(&k, &hex::encode(&app), &hex::encode(&uid), "").unwrap();
        prop_assert_ne!(a, b);
    }
}

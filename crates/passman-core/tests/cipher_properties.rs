use passman_core::crypto::{CipherBlock, SecretKey, MIN_PAYLOAD_SIZE};
use passman_core::PassmanError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn round_trip_any_plaintext(
        key in prop::array::uniform32(any::<u8>()),
        plaintext in prop::collection::vec(any::<u8>(), 0..512),
        ad in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let cipher = CipherBlock::new(SecretKey::from_bytes(key));
        let payload = cipher.encrypt(&plaintext, &ad).unwrap();
        prop_assert_eq!(payload.len(), MIN_PAYLOAD_SIZE + plaintext.len());

        let opened = cipher.decrypt(&payload, &ad).unwrap();
        prop_assert_eq!(opened.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn mismatched_associated_data_never_opens(
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        a1 in prop::collection::vec(any::<u8>(), 0..32),
        a2 in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        prop_assume!(a1 != a2);
        let cipher = CipherBlock::new(SecretKey::generate().unwrap());
        let payload = cipher.encrypt(&plaintext, &a1).unwrap();

        let result = cipher.decrypt(&payload, &a2);
        prop_assert!(matches!(result, Err(PassmanError::AuthenticationFailure)));
    }
}

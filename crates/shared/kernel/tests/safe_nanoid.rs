use dhub_kernel::{SAFE_ALPHABET, safe_nanoid};

#[test]
fn default_ids_are_twelve_safe_characters() {
    for _ in 0..50 {
        let id = safe_nanoid!();
        assert_eq!(id.len(), 12);
        assert!(
            id.chars().all(|ch| SAFE_ALPHABET.contains(&ch)),
            "unexpected character in nanoid: {id}"
        );
    }
}

#[test]
fn custom_length_is_honored() {
    assert_eq!(safe_nanoid!(20).len(), 20);
    assert_eq!(safe_nanoid!(4).len(), 4);
}

#[test]
fn alphabet_excludes_ambiguous_characters() {
    for ambiguous in ['I', 'O', 'l', '0', '1'] {
        assert!(!SAFE_ALPHABET.contains(&ambiguous), "{ambiguous} should not be in the alphabet");
    }
}

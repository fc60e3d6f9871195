use super::*;

#[test]
fn stable_hash_is_deterministic() {
    assert_eq!(stable_hash_str("bioframe"), stable_hash_str("bioframe"));
    assert_ne!(stable_hash_str("bioframe"), stable_hash_str("bioframf"));
}

#[test]
fn length_prefix_separates_fields() {
    let mut a = StableHasher::new();
    a.write_str("ab");
    a.write_str("c");
    let mut b = StableHasher::new();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn percent_formatting_trims_zeros() {
    assert_eq!(fmt_percent(100.0), "100%");
    assert_eq!(fmt_percent(0.0), "0%");
    assert_eq!(fmt_percent(-0.0001), "0%");
    assert_eq!(fmt_percent(38.196_601), "38.2%");
    assert_eq!(fmt_percent(80.901_699), "80.9%");
    assert_eq!(fmt_percent(6.699_4), "6.7%");
}

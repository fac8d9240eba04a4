
use crate::utils::parse_pair;

#[test]
fn test_parse_pair_variants() {
    assert_eq!(parse_pair("Foo"), ("Foo", ""));
    assert_eq!(parse_pair("Foo:bar"), ("Foo", "bar"));
    assert_eq!(parse_pair("Foo:"), ("Foo", ""));
    // Only the first colon splits.
    assert_eq!(parse_pair("Foo:lib/a:b.so"), ("Foo", "lib/a:b.so"));
    assert_eq!(parse_pair(""), ("", ""));
}

//! Compile-fail cases for `#[derive(Operation)]`

#[test]
fn derive_errors_point_at_the_input() {
    let cases = trybuild::TestCases::new();
    cases.compile_fail("tests/ui/*.rs");
}

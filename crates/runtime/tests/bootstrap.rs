use extkit_core::env::Platform;

#[test]
fn default_locator_targets_the_build_platform() {
    let locator = extkit_runtime::build_default_locator();
    assert_eq!(*locator.platform(), Platform::current());
}

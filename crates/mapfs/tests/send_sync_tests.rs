//! Tests to verify that the public types are Send + Sync.

use mapfs::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_filesystem_is_send_sync() {
    assert_send_sync::<MapFs>();
    assert_send_sync::<FileReader>();
}

#[test]
fn test_domain_types_are_send_sync() {
    assert_send_sync::<NormalizedPath>();
    assert_send_sync::<Metadata>();
    assert_send_sync::<File>();
    assert_send_sync::<Node>();
}

#[test]
fn test_error_is_send_sync() {
    assert_send_sync::<Error>();
}

/*! Integration tests for rustydoc.
 *
 * Organized as a single integration test binary:
 * - helpers: shared document builders
 * - tree: sharing, copying, attach/detach rules and ownership
 * - equivalence: structural comparison versus identity
 * - properties: ordering and in-place replacement
 * - codec: binary and markup round trips, partial decode
 * - concurrency: handles shared across threads
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rustydoc=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod codec;
mod concurrency;
mod equivalence;
mod helpers;
mod properties;
mod tree;

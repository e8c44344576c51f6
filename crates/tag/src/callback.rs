//! Tag creation callbacks
//!
//! Callers may register callbacks that observe successful tag creation
//! (e.g. to sync the new tag into an external catalog). Callbacks hold
//! scoped resources and must be released exactly once, whether or not
//! their notification succeeded.

use shale_core::Result;
use tracing::warn;

/// Observer of tag creation
pub trait TagCallback {
    /// Called once after the tag file has been committed
    fn notify_creation(&mut self, tag_name: &str) -> Result<()>;

    /// Release the callback's resources. Called exactly once, after all
    /// callbacks have been notified.
    fn close(&mut self) -> Result<()>;
}

/// Notify every callback of `tag_name`'s creation, then close every
/// callback unconditionally.
///
/// All notifications run even if one fails; the first notification
/// failure is surfaced after every callback has been closed. Close
/// failures are logged and swallowed.
pub fn notify_and_close(tag_name: &str, mut callbacks: Vec<Box<dyn TagCallback>>) -> Result<()> {
    let mut first_err = None;
    for callback in callbacks.iter_mut() {
        if let Err(e) = callback.notify_creation(tag_name) {
            warn!(tag = tag_name, error = %e, "tag creation callback failed");
            if first_err.is_none() {
                first_err = Some(e);
            }
        }
    }

    for callback in callbacks.iter_mut() {
        if let Err(e) = callback.close() {
            warn!(tag = tag_name, error = %e, "failed to close tag callback");
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

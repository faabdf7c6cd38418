//! Shared owner passphrase for create, edit and delete.
//!
//! This only keeps casual visitors from reaching the editing screens. The
//! passphrase is a constant compiled into the binary and anyone with the
//! data directory can edit the JSON directly, so it is not an access control
//! boundary. There is no lockout or attempt tracking.

use crate::error::{Error, Result};

pub const OWNER_PASSPHRASE: &str = "7$1%0@";

/// Exact comparison against [`OWNER_PASSPHRASE`].
pub fn check(input: &str) -> Result<()> {
    if input == OWNER_PASSPHRASE {
        Ok(())
    } else {
        tracing::warn!("Rejected passphrase attempt");
        Err(Error::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_passphrase_passes() {
        assert!(check("7$1%0@").is_ok());
        assert!(matches!(check("7$1%0@ "), Err(Error::AccessDenied)));
        assert!(check("").is_err());
    }

    #[test]
    fn test_denied_message() {
        let err = check("nope").unwrap_err();
        assert_eq!(err.to_string(), "Incorrect password. Access denied.");
    }
}

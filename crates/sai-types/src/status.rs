//! SAI status codes returned across the plugin ABI.

use std::fmt;

macro_rules! define_status {
    ($( $variant:ident = $value:literal => $name:literal, )*) => {
        /// SAI status codes (`sai_status_t`).
        ///
        /// The translation layer itself produces only a small subset:
        /// `Success`, `Failure` (every remote-call fault), `NotImplemented`
        /// (unmapped object type / operation), `NotExecuted` (bulk items that
        /// were never attempted), `InvalidParameter` and `Uninitialized`
        /// (malformed ABI input). The rest are accepted from `from_raw`.
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SaiStatus {
            $( $variant = $value, )*
        }

        impl SaiStatus {
            /// Creates a SaiStatus from a raw i32 value.
            ///
            /// Unknown codes collapse to [`SaiStatus::Failure`].
            pub fn from_raw(status: i32) -> Self {
                match status {
                    $( $value => SaiStatus::$variant, )*
                    _ => SaiStatus::Failure,
                }
            }

            /// Returns the SAI enum name, e.g. `SAI_STATUS_SUCCESS`.
            pub const fn name(&self) -> &'static str {
                match self {
                    $( SaiStatus::$variant => $name, )*
                }
            }
        }
    };
}

define_status! {
    Success = 0 => "SAI_STATUS_SUCCESS",
    Failure = -1 => "SAI_STATUS_FAILURE",
    NotSupported = -2 => "SAI_STATUS_NOT_SUPPORTED",
    NoMemory = -3 => "SAI_STATUS_NO_MEMORY",
    InsufficientResources = -4 => "SAI_STATUS_INSUFFICIENT_RESOURCES",
    InvalidParameter = -5 => "SAI_STATUS_INVALID_PARAMETER",
    ItemAlreadyExists = -6 => "SAI_STATUS_ITEM_ALREADY_EXISTS",
    ItemNotFound = -7 => "SAI_STATUS_ITEM_NOT_FOUND",
    BufferOverflow = -8 => "SAI_STATUS_BUFFER_OVERFLOW",
    Uninitialized = -12 => "SAI_STATUS_UNINITIALIZED",
    NotImplemented = -15 => "SAI_STATUS_NOT_IMPLEMENTED",
    InvalidObjectType = -18 => "SAI_STATUS_INVALID_OBJECT_TYPE",
    InvalidObjectId = -19 => "SAI_STATUS_INVALID_OBJECT_ID",
    NotExecuted = -23 => "SAI_STATUS_NOT_EXECUTED",
}

impl SaiStatus {
    /// Returns the raw `sai_status_t` value.
    pub const fn as_raw(&self) -> i32 {
        *self as i32
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == SaiStatus::Success
    }

    /// Returns true if the status indicates an error.
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// `Ok(())` for success, the status itself otherwise.
    pub fn into_result(self) -> Result<(), SaiStatus> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for SaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return from its `Result`-returning APIs.
///
/// Note that the table mutation API ([`crate::ResourceTable::add_resource`] and friends) does
/// not use this type. Data problems discovered while adding resources (invalid names, id
/// conflicts, value collisions) are reported through a [`crate::Diagnostics`] sink so callers
/// can keep collecting errors across many inputs. This enum covers everything else: parsing
/// textual names and ids, package creation, and access to backing files.
///
/// # Error Categories
///
/// ## Parsing Errors
/// - [`Error::InvalidResourceName`] - Text could not be parsed as `[package:]type/entry`
/// - [`Error::InvalidResourceId`] - Text could not be parsed as a `0xPPTTEEEE` id
/// - [`Error::Malformed`] - Structurally invalid input (e.g. a style span outside its text)
///
/// ## Table Errors
/// - [`Error::PackageIdConflict`] - A package exists under the same name with another id
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of a backing file
///
/// # Examples
///
/// ```rust
/// use restable::{Error, ResourceName};
///
/// match "string/app_name".parse::<ResourceName>() {
///     Ok(name) => println!("Parsed {}", name),
///     Err(Error::InvalidResourceName(text)) => eprintln!("Bad name: {}", text),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input is structurally invalid.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Text could not be parsed as a resource name.
    ///
    /// Resource names have the form `[package:]type/entry`. The associated value is
    /// the rejected input.
    #[error("Invalid resource name - '{0}'")]
    InvalidResourceName(String),

    /// Text could not be parsed as a resource id.
    ///
    /// Resource ids are hexadecimal `0xPPTTEEEE` values with a non-zero type byte.
    #[error("Invalid resource id - '{0}'")]
    InvalidResourceId(String),

    /// A package with the requested name already exists with a different id.
    #[error("Package '{name}' already has id 0x{existing:02x}, requested 0x{requested:02x}")]
    PackageIdConflict {
        /// Name of the conflicting package
        name: String,
        /// The id already recorded on the package
        existing: u8,
        /// The id that was requested
        requested: u8,
    },

    /// An out of bound access was attempted on a backing file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or mapping backing files.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

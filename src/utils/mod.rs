pub mod extractor;
pub mod file_magic;
pub mod format;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod validate;

pub use extractor::{SafeDocumentIdI64, SafeModuleIdI64, SafeSemesterIdI64, SafeYearIdI64};
pub use file_magic::{detect_image_mime, mime_from_extension, validate_magic_bytes};
pub use format::format_file_size;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use random_code::generate_token;

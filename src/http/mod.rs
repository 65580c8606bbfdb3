//! HTTP protocol layer module
//!
//! Response builders and form decoding, decoupled from the wiki's page logic.

pub mod form;
pub mod response;

// Re-export commonly used types
pub use form::{form_field, FormError, BODY_FIELD};
pub use response::{
    build_400_response, build_404_response, build_413_response, build_415_response,
    build_500_response, build_html_response, build_redirect_response, with_server_header,
};

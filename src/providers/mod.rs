pub mod openai;

pub(crate) mod http_errors;

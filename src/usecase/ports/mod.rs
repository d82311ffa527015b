pub mod kv;
pub mod source;

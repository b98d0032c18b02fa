mod env_flags;
mod integer_id;

pub use env_flags::parse_boolean_flag;
pub(crate) use integer_id::integer_id;

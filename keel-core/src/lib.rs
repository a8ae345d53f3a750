mod as_value;
mod connection;
mod decode_type;
mod entity;
mod executor;
mod field;
mod kind;
mod mapper;
mod query;
mod record;
mod save;
mod shape;
mod statement_writer;
mod tag;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use connection::*;
pub use decode_type::*;
pub use entity::*;
pub use executor::*;
pub use field::*;
pub use kind::*;
pub use mapper::*;
pub use query::*;
pub use record::*;
pub use save::*;
pub use shape::*;
pub use statement_writer::*;
pub use tag::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
pub use ::time;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

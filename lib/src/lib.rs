//! Publishes curated off-label drug indications as signed nanopublications.
//!
//! Each spreadsheet row ([`row::SourceRow`]) is mapped by [`mapper::Mapper`] onto a
//! Biolink chemical-to-disease association, wrapped into a [`nanopub::Nanopub`], then
//! signed or published through a [`publish::Publisher`]. [`driver::run`] ties the steps
//! together and finishes with a nanopub index over every produced statement.

extern crate derive_builder;

pub mod config;
pub mod consts;
pub mod driver;
pub mod errors;
pub mod fetch;
pub mod index;
pub mod mapper;
pub mod nanopub;
pub mod options;
pub mod profile;
pub mod publish;
pub mod row;
pub mod shapes;

//! The line-width-aware print engine: language printers build a [`ir::PrintItems`] tree out of
//! text and layout [`ir::Signal`]s, then hand it to [`print::print`] (or [`print::format`]),
//! which walks it with [`printer::Printer`], writing through [`writer::Writer`] and
//! backtracking via save points whenever a layout decision depends on text not yet printed.

mod arena;
mod collections;
mod ir;
mod printer;
mod write_items;
mod writer;

pub mod condition_helpers;
pub mod condition_resolvers;
pub mod conditions;
pub mod ir_helpers;
pub mod print;

pub use ir::{
  Condition, ConditionProperties, ConditionReference, ConditionResolver, ConditionResolverContext, Info, PrintItems, RawStringContainer, Signal,
  StringContainer, WriterInfo,
};
pub use print::{format, print, PrintOptions};

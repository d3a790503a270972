pub mod records;
pub mod tables;

pub use records::{
    AreaRecord, PostcodeAreaMapping, SelectionKind, SeriesRow, ServiceUsage, UserSelection,
};
pub use tables::{ReferenceTables, SeriesStore};

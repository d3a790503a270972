pub mod classifier;
pub mod resolver;
pub mod search;

pub use classifier::{Classification, ClassifyOutcome, ResolvedArea, classify, quintile_from_decile};
pub use resolver::{Candidate, Resolver, ResolverTuning};
pub use search::{QueryTicket, SearchDebouncer, SearchOutcome, SearchTuning};

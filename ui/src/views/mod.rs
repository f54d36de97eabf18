mod cohort;
pub use cohort::CohortPage;

mod embryo;
pub use embryo::EmbryoPage;

mod compare;
pub use compare::ComparePage;

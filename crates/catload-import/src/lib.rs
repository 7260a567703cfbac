pub mod categories;
pub mod client;
pub mod error;
pub mod mapping;
pub mod normalize;
pub mod price;
pub mod source;
pub mod submit;

pub use categories::{ensure_category, find_category};
pub use client::AdminClient;
pub use error::{ClientError, ImportError};
pub use mapping::{FieldMapping, FieldSource, FlagMapping, MappingProfile, OriginalPriceRule};
pub use normalize::{FieldWarning, Normalized, Normalizer};
pub use source::{detect_format, read_platform_plans, read_rows, PlatformPlans};
pub use submit::{
    bulk_submit, submit_category, submit_product, BulkOptions, BulkSummary, RowFailure,
    SubmissionOutcome, SubmitFailure,
};

pub mod api;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod export;
pub mod history;
pub mod interest;
pub mod record;
pub mod store;
pub mod tracker;
pub mod types;
pub mod validation;

// re-export key types
pub use config::{StorageConfig, TrackerConfig};
pub use decimal::{Money, MonthlyRate};
pub use errors::{Result, TrackerError, ValidationError};
pub use export::{to_csv_string, write_csv, CSV_HEADERS};
pub use history::{HistoryCollection, DEFAULT_HISTORY_LIMIT};
pub use interest::{compute_interest, month_span, resolve_period, InterestResult};
pub use record::{Calculation, InvestmentRecord};
pub use store::{FileStore, InvestmentStore, MemoryStore};
pub use tracker::InvestmentTracker;
pub use types::{InvestmentId, InvestmentStatus, ValidationField};
pub use validation::{NewInvestment, ValidationLimits};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

pub mod adapter;
pub mod value;

pub use adapter::*;
pub use value::*;

/// Store collection names. Document ids: employee-id, stringified
/// monotonic log-id / transaction-id, uuid for the rest; configuration
/// documents use the config key as id.
pub mod collections {
    pub const EMPLOYEES: &str = "employees";
    pub const OVERTIME_LOGS: &str = "overtimeLogs";
    pub const CERTIFICATES: &str = "certificates";
    pub const CREDIT_BATCHES: &str = "creditBatches";
    pub const LEDGER: &str = "ledger";
    pub const HOLIDAYS: &str = "holidays";
    pub const CONFIGURATION: &str = "configuration";
    pub const LIBRARIES: &str = "libraries";

    // Implementation collections, not part of the public document surface.
    pub const LOCKS: &str = "locks";
    pub const ID_COUNTERS: &str = "idCounters";
}

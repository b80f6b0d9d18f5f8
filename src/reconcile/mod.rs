pub mod audit;
pub mod flatten;

pub use audit::{
    audit_locales, report_path, resolve_target_locales, AuditOptions, AuditResult,
    FilesBySprinkle, LocaleLoader,
};
pub use flatten::{find_empty_leaves, flatten, intersect_matching, intersect_values, FlatMap};

/// Registry name of the affine / range-fitting mapper
pub const LINEAR: &str = "linear";
/// Registry name of the saturating weighted-sum mapper
pub const WEIGHTED_SUM: &str = "weightedsum";
/// Registry name of the Y-Z-X quaternion angle extractor
pub const QUATERNION_TO_EULER_YZX: &str = "quaternion2euler";
/// Registry name of the Y-Z-Y flavoured quaternion angle extractor
pub const QUATERNION_TO_EULER_YZY: &str = "quaternion2YZY";
/// Stage name reported by chained pipelines
pub const COMPOSITE: &str = "composite";

/// Log filter used by the binary when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

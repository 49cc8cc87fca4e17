/// Configuration for [`Parser`](crate::Parser).
///
/// There is deliberately no ambient or process-wide configuration; every
/// limit is an explicit option carried by the call.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum container nesting depth accepted before parsing fails with
    /// `DepthExceeded` instead of risking stack exhaustion.
    /// Default: 128.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// Configuration for [`Writer`](crate::Writer).
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Significant digits used when rendering float values. The writer honors
    /// whatever the caller configures here; output is always re-parseable to a
    /// numerically close float.
    /// Default: 12.
    pub float_precision: usize,

    /// Maximum container nesting depth rendered before writing fails with
    /// `DepthExceeded` instead of risking stack exhaustion.
    /// Default: 128.
    pub max_depth: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { float_precision: 12, max_depth: 128 }
    }
}
